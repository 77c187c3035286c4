use crate::error::ServiceError;
use crate::services::library::store::{find_item, list_items};
use common::model::library::{LibraryCategory, LibraryItem, LibraryItemData};
use common::model::use_case::{
    DocumentationLink, NewDocumentationLink, NewSuccessCriterion, RequirementSummary,
    SuccessCriterion, TestCaseSummary, UseCaseDetail,
};
use rusqlite::{params, Connection};
use std::collections::HashMap;

/// Child rows of every use case, keyed by use-case id.
#[derive(Default)]
struct Related {
    test_cases: HashMap<i64, Vec<TestCaseSummary>>,
    requirements: HashMap<i64, Vec<RequirementSummary>>,
    links: HashMap<i64, Vec<DocumentationLink>>,
    criteria: HashMap<i64, Vec<SuccessCriterion>>,
}

impl Related {
    fn load(conn: &Connection) -> Result<Self, ServiceError> {
        let mut related = Related::default();

        for item in list_items(conn, LibraryCategory::TestCases)? {
            if let LibraryItemData::TestCases(tc) = item.data {
                if let Some(use_case_id) = tc.use_case_id {
                    related.test_cases.entry(use_case_id).or_default().push(TestCaseSummary {
                        id: item.id,
                        name: tc.name,
                        expected_outcome: tc.expected_outcome,
                    });
                }
            }
        }

        for item in list_items(conn, LibraryCategory::Requirements)? {
            if let LibraryItemData::Requirements(req) = item.data {
                if let Some(use_case_id) = req.use_case_id {
                    related.requirements.entry(use_case_id).or_default().push(RequirementSummary {
                        id: item.id,
                        title: req.title,
                        description: req.description,
                        justification: req.justification,
                    });
                }
            }
        }

        let mut stmt = conn.prepare(
            "SELECT id, use_case_id, title, url FROM use_case_documentation_links ORDER BY id",
        )?;
        let links = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(1)?,
                DocumentationLink {
                    id: row.get(0)?,
                    title: row.get(2)?,
                    url: row.get(3)?,
                },
            ))
        })?;
        for link in links {
            let (use_case_id, link) = link?;
            related.links.entry(use_case_id).or_default().push(link);
        }

        let mut stmt = conn.prepare(
            "SELECT id, use_case_id, description FROM use_case_success_criteria ORDER BY id",
        )?;
        let criteria = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(1)?,
                SuccessCriterion {
                    id: row.get(0)?,
                    description: row.get(2)?,
                },
            ))
        })?;
        for criterion in criteria {
            let (use_case_id, criterion) = criterion?;
            related.criteria.entry(use_case_id).or_default().push(criterion);
        }

        Ok(related)
    }

    fn detail(&mut self, item: LibraryItem) -> Result<UseCaseDetail, ServiceError> {
        let LibraryItemData::UseCases(use_case) = item.data else {
            return Err(ServiceError::Internal(format!(
                "Library item {} is not a use case",
                item.id
            )));
        };
        Ok(UseCaseDetail {
            id: item.id,
            is_custom: item.is_custom,
            title: use_case.title,
            category: use_case.category,
            description: use_case.description,
            priority: use_case.priority,
            applicable_industries: use_case.applicable_industries,
            applicable_goals: use_case.applicable_goals,
            is_baseline: use_case.is_baseline,
            test_cases: self.test_cases.remove(&item.id).unwrap_or_default(),
            documentation_links: self.links.remove(&item.id).unwrap_or_default(),
            success_criteria: self.criteria.remove(&item.id).unwrap_or_default(),
            requirements: self.requirements.remove(&item.id).unwrap_or_default(),
        })
    }
}

pub fn list_details(conn: &Connection) -> Result<Vec<UseCaseDetail>, ServiceError> {
    let mut related = Related::load(conn)?;
    list_items(conn, LibraryCategory::UseCases)?
        .into_iter()
        .map(|item| related.detail(item))
        .collect()
}

pub fn find_detail(conn: &Connection, id: i64) -> Result<UseCaseDetail, ServiceError> {
    let item = find_item(conn, LibraryCategory::UseCases, id)?;
    Related::load(conn)?.detail(item)
}

pub fn add_documentation_link(
    conn: &Connection,
    use_case_id: i64,
    link: NewDocumentationLink,
) -> Result<DocumentationLink, ServiceError> {
    find_item(conn, LibraryCategory::UseCases, use_case_id)?;
    let title = link.title.trim();
    let url = link.url.trim();
    if title.is_empty() || url.is_empty() {
        return Err(ServiceError::Validation(
            "Documentation links need a title and a url".to_string(),
        ));
    }
    conn.execute(
        "INSERT INTO use_case_documentation_links (use_case_id, title, url) VALUES (?1, ?2, ?3)",
        params![use_case_id, title, url],
    )?;
    Ok(DocumentationLink {
        id: conn.last_insert_rowid(),
        title: title.to_string(),
        url: url.to_string(),
    })
}

pub fn add_success_criterion(
    conn: &Connection,
    use_case_id: i64,
    criterion: NewSuccessCriterion,
) -> Result<SuccessCriterion, ServiceError> {
    find_item(conn, LibraryCategory::UseCases, use_case_id)?;
    let description = criterion.description.trim();
    if description.is_empty() {
        return Err(ServiceError::Validation(
            "Success criteria need a description".to_string(),
        ));
    }
    conn.execute(
        "INSERT INTO use_case_success_criteria (use_case_id, description) VALUES (?1, ?2)",
        params![use_case_id, description],
    )?;
    Ok(SuccessCriterion {
        id: conn.last_insert_rowid(),
        description: description.to_string(),
    })
}
