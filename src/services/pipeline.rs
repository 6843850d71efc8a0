//! Load a stored projection, render it with advice and send it out

use log::info;
use serde::{Deserialize, Serialize};

use super::{advice_or_fallback, Advisor, DeliveryService, ReportGenerator, ResultStore, ServiceError};

/// A rendered report addressed to one recipient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub recipient: String,
    pub recipient_name: String,
    pub subject: String,
    pub document: Vec<u8>,
}

const REPORT_SUBJECT: &str = "Planificador de Pensión";
const DEFAULT_RECIPIENT_NAME: &str = "Usuario";

/// Send the report for a stored session
///
/// A missing session is `NotFound`. Advisor failures never stop the report.
pub fn send_report(
    store: &dyn ResultStore,
    advisor: &dyn Advisor,
    generator: &dyn ReportGenerator,
    delivery_service: &dyn DeliveryService,
    session_id: &str,
    recipient: &str,
) -> Result<(), ServiceError> {
    let record = store.load(session_id)?.ok_or_else(|| ServiceError::NotFound {
        session_id: session_id.to_string(),
    })?;

    let advice = advice_or_fallback(advisor, &record.bundle);
    let document = generator.render(&record, &advice)?;

    let recipient_name = if record.metadata.name.trim().is_empty() {
        DEFAULT_RECIPIENT_NAME.to_string()
    } else {
        record.metadata.name.clone()
    };

    let delivery = Delivery {
        recipient: recipient.to_string(),
        recipient_name,
        subject: REPORT_SUBJECT.to_string(),
        document,
    };
    delivery_service.deliver(&delivery)?;

    info!("Sent report for session {} ({} bytes)", session_id, delivery.document.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryStore;
    use crate::summary::tests::sample_record;
    use crate::summary::{PensionRecord, ProjectionBundle};
    use std::sync::Mutex;

    struct DownAdvisor;

    impl Advisor for DownAdvisor {
        fn advise(&self, _bundle: &ProjectionBundle) -> Result<Vec<String>, ServiceError> {
            Err(ServiceError::Unavailable("advisor offline".to_string()))
        }
    }

    struct TextReport;

    impl ReportGenerator for TextReport {
        fn render(&self, record: &PensionRecord, advice: &[String]) -> Result<Vec<u8>, ServiceError> {
            Ok(format!("{}|{}", record.session_id, advice.len()).into_bytes())
        }
    }

    #[derive(Default)]
    struct Outbox {
        sent: Mutex<Vec<Delivery>>,
        reject: bool,
    }

    impl DeliveryService for Outbox {
        fn deliver(&self, delivery: &Delivery) -> Result<(), ServiceError> {
            if self.reject {
                return Err(ServiceError::Rejected("mailbox full".to_string()));
            }
            self.sent.lock().unwrap().push(delivery.clone());
            Ok(())
        }
    }

    #[test]
    fn test_report_is_delivered_despite_advisor_failure() {
        let store = InMemoryStore::new();
        store.save(sample_record("s-1")).unwrap();
        let outbox = Outbox::default();

        send_report(&store, &DownAdvisor, &TextReport, &outbox, "s-1", "ana@example.com").unwrap();

        let sent = outbox.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "ana@example.com");
        assert_eq!(sent[0].recipient_name, "Ana");
        assert_eq!(sent[0].document, b"s-1|5".to_vec());
    }

    #[test]
    fn test_missing_session() {
        let store = InMemoryStore::new();
        let outbox = Outbox::default();

        let err = send_report(&store, &DownAdvisor, &TextReport, &outbox, "nope", "x@example.com").unwrap_err();

        assert_eq!(err, ServiceError::NotFound { session_id: "nope".to_string() });
        assert!(outbox.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_blank_name_uses_placeholder() {
        let store = InMemoryStore::new();
        let mut record = sample_record("s-2");
        record.metadata.name = " ".to_string();
        store.save(record).unwrap();
        let outbox = Outbox::default();

        send_report(&store, &DownAdvisor, &TextReport, &outbox, "s-2", "x@example.com").unwrap();

        assert_eq!(outbox.sent.lock().unwrap()[0].recipient_name, "Usuario");
    }

    #[test]
    fn test_delivery_failure_is_reported() {
        let store = InMemoryStore::new();
        store.save(sample_record("s-3")).unwrap();
        let outbox = Outbox { reject: true, ..Outbox::default() };

        let err = send_report(&store, &DownAdvisor, &TextReport, &outbox, "s-3", "x@example.com").unwrap_err();
        assert!(matches!(err, ServiceError::Rejected(_)));
    }
}
