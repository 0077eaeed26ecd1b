//! Repository layer — entity-scoped database operations.
//!
//! One sub-module per table; all public functions are re-exported here.

mod client;
mod document;
mod extracted_field;
mod message;
mod task;

pub use client::*;
pub use document::*;
pub use extracted_field::*;
pub use message::*;
pub use task::*;

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rusqlite::{params, Connection};
    use uuid::Uuid;

    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::db::timestamp_now;
    use crate::models::enums::*;
    use crate::models::*;

    fn test_db() -> Connection {
        open_memory_database().unwrap()
    }

    fn make_client(conn: &Connection) -> Uuid {
        let id = Uuid::new_v4();
        let now = timestamp_now();
        insert_client(
            conn,
            &Client {
                id,
                full_name: "Dana Whitfield".into(),
                email: format!("{id}@example.com"),
                filing_status: Some(FilingStatus::Single),
                tax_info: None,
                notes: None,
                created_at: now,
                updated_at: now,
            },
        )
        .unwrap();
        id
    }

    fn make_document(conn: &Connection, client_id: Uuid, tax_year: i32) -> Uuid {
        let id = Uuid::new_v4();
        insert_document(
            conn,
            &Document {
                id,
                client_id,
                file_name: "W2_AcmeCorp_2025.pdf".into(),
                document_type: DocumentType::W2,
                tax_year,
                status: DocumentStatus::Uploaded,
                confidence_score: Some(95.0),
                requires_review: true,
                notes: None,
                uploaded_at: timestamp_now(),
                processed_at: None,
                reviewed_at: None,
            },
        )
        .unwrap();
        id
    }

    fn make_field(conn: &Connection, document_id: Uuid, name: &str, value: Option<&str>) -> Uuid {
        let id = Uuid::new_v4();
        insert_extracted_field(
            conn,
            &ExtractedField {
                id,
                document_id,
                field_name: name.into(),
                field_value: value.map(String::from),
                confidence_score: Some(0.0),
                manually_verified: false,
                verified_by: None,
                verified_at: None,
                extraction_method: ExtractionMethod::Deterministic,
                created_at: timestamp_now(),
            },
        )
        .unwrap();
        id
    }

    #[test]
    fn client_insert_and_retrieve() {
        let conn = test_db();
        let id = make_client(&conn);
        let client = get_client(&conn, &id).unwrap().unwrap();
        assert_eq!(client.full_name, "Dana Whitfield");
        assert_eq!(client.filing_status, Some(FilingStatus::Single));
        assert!(client.tax_info.is_none());
    }

    #[test]
    fn client_missing_returns_none() {
        let conn = test_db();
        assert!(get_client(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn client_tax_info_round_trip() {
        let conn = test_db();
        let id = make_client(&conn);
        let info = ClientTaxInfo {
            income_sources: vec![IncomeSource {
                source_type: "w2_wages".into(),
                source_name: "Acme".into(),
                amount: "52000".into(),
            }],
            deductions: vec![],
            dependents: vec![],
        };
        update_client_tax_info(&conn, &id, Some(&info), &timestamp_now()).unwrap();

        let stored = get_client_tax_info(&conn, &id).unwrap().unwrap();
        assert_eq!(stored.income_sources.len(), 1);
        assert_eq!(stored.income_sources[0].source_name, "Acme");
    }

    #[test]
    fn client_tax_info_missing_client_errors() {
        let conn = test_db();
        assert!(get_client_tax_info(&conn, &Uuid::new_v4()).is_err());
        assert!(
            update_client_tax_info(&conn, &Uuid::new_v4(), None, &timestamp_now()).is_err()
        );
    }

    #[test]
    fn client_tax_info_unreadable_blob_degrades_to_none() {
        let conn = test_db();
        let id = make_client(&conn);
        conn.execute(
            "UPDATE clients SET tax_info = '{not json' WHERE id = ?1",
            params![id.to_string()],
        )
        .unwrap();
        assert!(get_client_tax_info(&conn, &id).unwrap().is_none());
        // The full client row still loads
        assert!(get_client(&conn, &id).unwrap().is_some());
    }

    #[test]
    fn document_insert_and_retrieve() {
        let conn = test_db();
        let client_id = make_client(&conn);
        let doc_id = make_document(&conn, client_id, 2025);
        let doc = get_document(&conn, &doc_id).unwrap().unwrap();
        assert_eq!(doc.file_name, "W2_AcmeCorp_2025.pdf");
        assert_eq!(doc.document_type, DocumentType::W2);
        assert_eq!(doc.status, DocumentStatus::Uploaded);
        assert!(doc.requires_review);
        assert_eq!(doc.confidence_score, Some(95.0));
    }

    #[test]
    fn documents_filter_by_tax_year() {
        let conn = test_db();
        let client_id = make_client(&conn);
        make_document(&conn, client_id, 2024);
        make_document(&conn, client_id, 2025);
        make_document(&conn, client_id, 2025);

        let all = get_documents_for_client(&conn, &client_id, None).unwrap();
        assert_eq!(all.len(), 3);

        let current = get_documents_for_client(&conn, &client_id, Some(2025)).unwrap();
        assert_eq!(current.len(), 2);
        assert!(current.iter().all(|d| d.tax_year == 2025));
    }

    #[test]
    fn document_reviewed_transition() {
        let conn = test_db();
        let client_id = make_client(&conn);
        let doc_id = make_document(&conn, client_id, 2025);

        set_document_reviewed(&conn, &doc_id, &timestamp_now()).unwrap();
        let doc = get_document(&conn, &doc_id).unwrap().unwrap();
        assert_eq!(doc.status, DocumentStatus::Reviewed);
        assert!(doc.reviewed_at.is_some());

        assert!(set_document_reviewed(&conn, &Uuid::new_v4(), &timestamp_now()).is_err());
    }

    #[test]
    fn fields_preserve_scaffold_order() {
        let conn = test_db();
        let client_id = make_client(&conn);
        let doc_id = make_document(&conn, client_id, 2025);
        make_field(&conn, doc_id, "employer_name", Some("Acme Corp"));
        make_field(&conn, doc_id, "wages_tips_compensation", None);
        make_field(&conn, doc_id, "federal_tax_withheld", None);

        let fields = get_fields_for_document(&conn, &doc_id).unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(
            names,
            ["employer_name", "wages_tips_compensation", "federal_tax_withheld"]
        );
    }

    #[test]
    fn verify_field_pins_confidence_and_reviewer() {
        let conn = test_db();
        let client_id = make_client(&conn);
        let doc_id = make_document(&conn, client_id, 2025);
        let field_id = make_field(&conn, doc_id, "wages_tips_compensation", None);

        let now = timestamp_now();
        let updated =
            verify_extracted_field(&conn, &field_id, "52000", "preparer-7", &now).unwrap();
        assert_eq!(updated.field_value.as_deref(), Some("52000"));
        assert!(updated.manually_verified);
        assert_eq!(updated.confidence_score, Some(100.0));
        assert_eq!(updated.verified_by.as_deref(), Some("preparer-7"));
        assert_eq!(updated.verified_at, Some(now));
    }

    #[test]
    fn verify_field_not_found() {
        let conn = test_db();
        let result = verify_extracted_field(&conn, &Uuid::new_v4(), "1", "p", &timestamp_now());
        assert!(result.is_err());
    }

    #[test]
    fn task_status_transitions() {
        let conn = test_db();
        let client_id = make_client(&conn);
        let task_id = Uuid::new_v4();
        insert_task(
            &conn,
            &Task {
                id: task_id,
                client_id,
                title: "Upload W-2".into(),
                description: None,
                priority: TaskPriority::High,
                status: TaskStatus::Pending,
                due_date: NaiveDate::from_ymd_opt(2026, 4, 15),
                created_at: timestamp_now(),
                completed_at: None,
            },
        )
        .unwrap();

        let done =
            update_task_status(&conn, &task_id, &TaskStatus::Completed, &timestamp_now()).unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
        assert!(done.completed_at.is_some());

        let reopened =
            update_task_status(&conn, &task_id, &TaskStatus::InProgress, &timestamp_now()).unwrap();
        assert_eq!(reopened.status, TaskStatus::InProgress);
        assert!(reopened.completed_at.is_none());

        let tasks = get_tasks_for_client(&conn, &client_id).unwrap();
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn message_thread_oldest_first_and_read_flag() {
        let conn = test_db();
        let client_id = make_client(&conn);
        let first = Uuid::new_v4();
        for (id, sender, body) in [
            (first, MessageSender::Client, "Uploaded my W-2"),
            (Uuid::new_v4(), MessageSender::Preparer, "Got it, thanks"),
        ] {
            insert_message(
                &conn,
                &Message {
                    id,
                    client_id,
                    sender,
                    subject: None,
                    body: body.into(),
                    read: false,
                    related_document_id: None,
                    created_at: timestamp_now(),
                },
            )
            .unwrap();
        }

        let thread = get_messages_for_client(&conn, &client_id).unwrap();
        assert_eq!(thread.len(), 2);
        assert_eq!(thread[0].body, "Uploaded my W-2");

        mark_message_read(&conn, &first).unwrap();
        let thread = get_messages_for_client(&conn, &client_id).unwrap();
        assert!(thread[0].read);
        assert!(!thread[1].read);

        assert!(mark_message_read(&conn, &Uuid::new_v4()).is_err());
    }
}
