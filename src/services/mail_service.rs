// src/services/mail_service.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    common::error::AppError,
    models::purchase_order::{PoStatus, PurchaseOrder},
    services::order_sheet::OrderSheet,
};

const SIGNATURE: &str = "Best Regards,\nPurchase Management System";
const ATTACH_PDF: &str = "Please download the PDF document separately and attach it to this email before sending.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Recipient {
    /// Time de Learning & Development
    Ld,
    Vendor,
    /// Agendamento e entrega
    Scheduler,
}

#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailParams {
    /// `ld`, `vendor` ou `scheduler`
    pub recipient: Recipient,
}

/// Endereços por papel, vindos da configuração.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipients {
    pub ld: String,
    pub vendor: String,
    pub scheduler: String,
}

impl Recipients {
    fn address(&self, recipient: Recipient) -> &str {
        match recipient {
            Recipient::Ld => &self.ld,
            Recipient::Vendor => &self.vendor,
            Recipient::Scheduler => &self.scheduler,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmailDraft {
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Link `mailto:` com assunto e corpo já codificados
    pub mailto: String,
}

#[derive(Debug, Clone)]
pub struct MailService {
    recipients: Recipients,
    organization: Option<String>,
}

impl MailService {
    pub fn new(recipients: Recipients, organization: Option<String>) -> Self {
        Self {
            recipients,
            organization,
        }
    }

    /// Monta o rascunho de e-mail do pedido para o destinatário.
    ///
    /// L&D recebe aviso de conclusão ou de rejeição; fornecedor e agendamento
    /// só recebem pedidos COMPLETED. Pedidos PENDING não geram e-mail.
    pub fn draft(&self, order: &PurchaseOrder, recipient: Recipient) -> Result<EmailDraft, AppError> {
        let sheet = OrderSheet::from(order);

        let (subject, body) = match (recipient, order.status) {
            (_, PoStatus::Pending) => {
                return Err(AppError::InvalidInput(format!(
                    "No email is available for pending purchase order {}",
                    sheet.po_number
                )));
            }
            (Recipient::Ld, PoStatus::Completed) => ld_completed(&sheet),
            (Recipient::Ld, PoStatus::Rejected) => ld_rejected(&sheet),
            (Recipient::Vendor, PoStatus::Completed) => self.vendor_issued(&sheet),
            (Recipient::Scheduler, PoStatus::Completed) => self.scheduler_issued(&sheet),
            (Recipient::Vendor | Recipient::Scheduler, PoStatus::Rejected) => {
                return Err(AppError::InvalidInput(format!(
                    "Only completed purchase orders can be sent to the vendor or scheduler ({} is {})",
                    sheet.po_number, sheet.status
                )));
            }
        };

        let to = self.recipients.address(recipient).to_string();
        let mailto = format!(
            "mailto:{}?subject={}&body={}",
            to,
            urlencoding::encode(&subject),
            urlencoding::encode(&body)
        );

        Ok(EmailDraft {
            to,
            subject,
            body,
            mailto,
        })
    }

    fn signature(&self) -> String {
        match &self.organization {
            Some(organization) => format!("{}\n{}", SIGNATURE, organization),
            None => SIGNATURE.to_string(),
        }
    }

    fn vendor_issued(&self, sheet: &OrderSheet) -> (String, String) {
        let subject = format!("Purchase Order Issued - {}", sheet.po_number);
        let body = format!(
            "Dear Vendor,\n\n\
             Congratulations! Purchase Order {po} has been issued.\n\n\
             {details}\n\n\
             Order Amount:\n-------------\n\
             Amount (INR): {inr}\n\
             Amount (USD): {usd}\n\n\
             {attach}\n\n\
             Please proceed with the order as per the agreement.\n\n\
             {signature}",
            po = sheet.po_number,
            details = details(sheet, "COMPLETED"),
            inr = sheet.amount_inr,
            usd = sheet.amount_usd,
            attach = ATTACH_PDF,
            signature = self.signature(),
        );
        (subject, body)
    }

    fn scheduler_issued(&self, sheet: &OrderSheet) -> (String, String) {
        let subject = format!("Purchase Order Issued - {}", sheet.po_number);
        let body = format!(
            "Dear Scheduler & Delivery Team,\n\n\
             Purchase Order {po} has been issued and requires scheduling and delivery coordination.\n\n\
             {details}\n\n\
             Order Amount:\n-------------\n\
             Amount (INR): {inr}\n\
             Amount (USD): {usd}\n\n\
             {references}\n\n\
             {attach}\n\n\
             Please coordinate with the vendor for scheduling and delivery of the order.\n\n\
             {signature}",
            po = sheet.po_number,
            details = details(sheet, "COMPLETED"),
            inr = sheet.amount_inr,
            usd = sheet.amount_usd,
            references = references(sheet),
            attach = ATTACH_PDF,
            signature = self.signature(),
        );
        (subject, body)
    }
}

fn details(sheet: &OrderSheet, status: &str) -> String {
    format!(
        "Purchase Order Details:\n-----------------------\n\
         PO Number: {}\n\
         Order Date: {}\n\
         Event ID: {}\n\
         Vendor ID: {}\n\
         Status: {}",
        sheet.po_number, sheet.order_date, sheet.event_id, sheet.vendor_id, status
    )
}

fn financials(sheet: &OrderSheet) -> String {
    format!(
        "Financial Details:\n------------------\n\
         Order Amount (INR): {}\n\
         Order Amount (USD): {}",
        sheet.amount_inr, sheet.amount_usd
    )
}

fn references(sheet: &OrderSheet) -> String {
    format!(
        "Reference IDs:\n--------------\n\
         Purchase Request ID: {}\n\
         Negotiation ID: {}",
        sheet.prid, sheet.negotiation_id
    )
}

fn ld_completed(sheet: &OrderSheet) -> (String, String) {
    let subject = format!("Purchase Order Completed - {}", sheet.po_number);
    let body = format!(
        "Dear L&D Team,\n\n\
         The Purchase Order {po} has been COMPLETED.\n\n\
         {details}\n\n{financials}\n\n{references}\n\n\
         {attach}\n\n\
         {signature}",
        po = sheet.po_number,
        details = details(sheet, &sheet.status),
        financials = financials(sheet),
        references = references(sheet),
        attach = ATTACH_PDF,
        signature = SIGNATURE,
    );
    (subject, body)
}

fn ld_rejected(sheet: &OrderSheet) -> (String, String) {
    let subject = format!("Purchase Order {} - {}", sheet.status, sheet.po_number);
    let body = format!(
        "Dear L&D Team,\n\n\
         URGENT: Purchase Order {po} has been {status}.\n\n\
         {details}\n\n{financials}\n\n{references}\n\n\
         Please review and take necessary action.\n\n\
         {signature}",
        po = sheet.po_number,
        status = sheet.status,
        details = details(sheet, &sheet.status),
        financials = financials(sheet),
        references = references(sheet),
        signature = SIGNATURE,
    );
    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn service() -> MailService {
        MailService::new(
            Recipients {
                ld: "ld@example.com".into(),
                vendor: "vendor@example.com".into(),
                scheduler: "scheduler@example.com".into(),
            },
            Some("Acme Corporation".into()),
        )
    }

    fn order(status: PoStatus) -> PurchaseOrder {
        PurchaseOrder {
            id: 12,
            event_id: 7,
            event_name: "Leadership Bootcamp".into(),
            vendor_id: 3,
            vendor_name: "Acme Training".into(),
            cdsid: "ab12".into(),
            order_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            order_amount_inr: dec!(8300),
            order_amount_usd: dec!(100),
            status,
            prid: Some(4),
            negotiation_id: Some(5),
        }
    }

    #[test]
    fn ld_gets_completed_template() {
        let draft = service().draft(&order(PoStatus::Completed), Recipient::Ld).unwrap();

        assert_eq!(draft.to, "ld@example.com");
        assert_eq!(draft.subject, "Purchase Order Completed - PO-12");
        assert!(draft.body.starts_with("Dear L&D Team,"));
        assert!(draft.body.contains("The Purchase Order PO-12 has been COMPLETED."));
        assert!(draft.body.contains("Order Amount (INR): Rs. 8,300.00"));
        assert!(draft.body.contains("Negotiation ID: 5"));
    }

    #[test]
    fn ld_gets_urgent_template_for_rejected() {
        let draft = service().draft(&order(PoStatus::Rejected), Recipient::Ld).unwrap();

        assert_eq!(draft.subject, "Purchase Order REJECTED - PO-12");
        assert!(draft.body.contains("URGENT: Purchase Order PO-12 has been REJECTED."));
        assert!(draft.body.contains("Please review and take necessary action."));
    }

    #[test]
    fn vendor_and_scheduler_only_for_completed() {
        let service = service();
        let completed = order(PoStatus::Completed);

        let vendor = service.draft(&completed, Recipient::Vendor).unwrap();
        assert_eq!(vendor.to, "vendor@example.com");
        assert_eq!(vendor.subject, "Purchase Order Issued - PO-12");
        assert!(vendor.body.ends_with("Acme Corporation"));

        let scheduler = service.draft(&completed, Recipient::Scheduler).unwrap();
        assert!(scheduler.body.starts_with("Dear Scheduler & Delivery Team,"));
        assert!(scheduler.body.contains("Purchase Request ID: 4"));

        let rejected = order(PoStatus::Rejected);
        assert!(matches!(service.draft(&rejected, Recipient::Vendor), Err(AppError::InvalidInput(_))));
        assert!(matches!(service.draft(&rejected, Recipient::Scheduler), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn pending_orders_have_no_draft() {
        let service = service();
        for recipient in [Recipient::Ld, Recipient::Vendor, Recipient::Scheduler] {
            assert!(service.draft(&order(PoStatus::Pending), recipient).is_err());
        }
    }

    #[test]
    fn mailto_encodes_subject_and_body() {
        let draft = service().draft(&order(PoStatus::Completed), Recipient::Ld).unwrap();

        assert!(draft.mailto.starts_with("mailto:ld@example.com?subject=Purchase%20Order%20Completed%20-%20PO-12&body="));
        assert!(draft.mailto.contains("Dear%20L%26D%20Team%2C%0A"));
        assert!(!draft.mailto.contains('\n'));
    }
}
