// src/services/document_service.rs

use std::path::PathBuf;

use chrono::Utc;
use genpdf::{elements, style, Alignment, Element};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{common::error::AppError, models::purchase_order::PurchaseOrder, services::order_sheet::OrderSheet};

const SYSTEM_NAME: &str = "Purchase Management System";

/// Para quem vai a via do PDF. Muda só o nome do arquivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PdfCopy {
    #[default]
    Ld,
    Vendor,
}

impl PdfCopy {
    pub fn file_name(self, po_id: i32) -> String {
        match self {
            PdfCopy::Ld => format!("PO-{}_LD.pdf", po_id),
            PdfCopy::Vendor => format!("PO-{}_Vendor.pdf", po_id),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PdfParams {
    /// `ld` (padrão) ou `vendor`
    pub copy: Option<PdfCopy>,
}

#[derive(Debug, Clone)]
pub struct DocumentService {
    font_dir: PathBuf,
    font_family: String,
    organization: Option<String>,
}

impl DocumentService {
    pub fn new(font_dir: impl Into<PathBuf>, font_family: impl Into<String>, organization: Option<String>) -> Self {
        Self {
            font_dir: font_dir.into(),
            font_family: font_family.into(),
            organization,
        }
    }

    pub fn render_order(&self, order: &PurchaseOrder) -> Result<Vec<u8>, AppError> {
        let sheet = OrderSheet::from(order);

        // Carrega a fonte da pasta configurada
        let font_family = genpdf::fonts::from_files(&self.font_dir, &self.font_family, None).map_err(|e| {
            AppError::DocumentError(format!(
                "Font '{}' not found in {}: {}",
                self.font_family,
                self.font_dir.display(),
                e
            ))
        })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Purchase Order {}", sheet.po_number));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new("PURCHASE ORDER")
                .aligned(Alignment::Center)
                .styled(style::Style::new().bold().with_font_size(20)),
        );
        if let Some(organization) = &self.organization {
            doc.push(
                elements::Paragraph::new(organization.as_str())
                    .aligned(Alignment::Center)
                    .styled(style::Style::new().with_font_size(11)),
            );
        }
        doc.push(
            elements::Paragraph::new(SYSTEM_NAME)
                .aligned(Alignment::Center)
                .styled(style::Style::new().with_font_size(11)),
        );
        doc.push(elements::Break::new(2));

        // Duas colunas: dados do pedido | evento, fornecedor, solicitante
        let mut header = elements::TableLayout::new(vec![1, 1]);
        let header_rows = [
            (format!("PO Number: {}", sheet.po_number), format!("Event ID: {}", sheet.event_id)),
            (format!("Date: {}", sheet.order_date), format!("Vendor ID: {}", sheet.vendor_id)),
            (format!("Status: {}", sheet.status), format!("CDSID: {}", sheet.cdsid)),
        ];
        for (left, right) in header_rows {
            header
                .row()
                .element(elements::Paragraph::new(left))
                .element(elements::Paragraph::new(right))
                .push()
                .map_err(|e| AppError::DocumentError(e.to_string()))?;
        }
        doc.push(header);
        doc.push(elements::Break::new(1.5));

        // --- VALORES E REFERÊNCIAS ---
        let mut table = elements::TableLayout::new(vec![1, 1]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        let bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Description").styled(bold))
            .element(elements::Paragraph::new("Details").styled(bold))
            .push()
            .map_err(|e| AppError::DocumentError(e.to_string()))?;

        let rows = [
            ("Order Amount (INR)", &sheet.amount_inr),
            ("Order Amount (USD)", &sheet.amount_usd),
            ("Purchase Request ID", &sheet.prid),
            ("Negotiation ID", &sheet.negotiation_id),
        ];
        for (label, value) in rows {
            table
                .row()
                .element(elements::Paragraph::new(label))
                .element(elements::Paragraph::new(value.as_str()))
                .push()
                .map_err(|e| AppError::DocumentError(e.to_string()))?;
        }
        doc.push(table);
        doc.push(elements::Break::new(3));

        // --- RODAPÉ ---
        let footer = style::Style::new().italic().with_font_size(8);
        doc.push(
            elements::Paragraph::new("This is a computer-generated document. No signature required.")
                .aligned(Alignment::Center)
                .styled(footer),
        );
        doc.push(
            elements::Paragraph::new(format!("Generated on: {}", Utc::now().format("%d/%m/%Y %H:%M:%S UTC")))
                .aligned(Alignment::Center)
                .styled(footer),
        );

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::DocumentError(e.to_string()))?;

        tracing::info!(po_id = order.id, bytes = buffer.len(), "Purchase order PDF rendered");
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::purchase_order::PoStatus;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn file_name_depends_on_copy() {
        assert_eq!(PdfCopy::Ld.file_name(7), "PO-7_LD.pdf");
        assert_eq!(PdfCopy::Vendor.file_name(7), "PO-7_Vendor.pdf");
        assert_eq!(PdfCopy::default(), PdfCopy::Ld);
    }

    #[test]
    fn missing_fonts_are_a_document_error() {
        let service = DocumentService::new("./no-such-font-dir", "Roboto", None);
        let order = PurchaseOrder {
            id: 1,
            event_id: 1,
            event_name: "Bootcamp".into(),
            vendor_id: 2,
            vendor_name: "Acme".into(),
            cdsid: "ab12".into(),
            order_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            order_amount_inr: dec!(830),
            order_amount_usd: dec!(10),
            status: PoStatus::Completed,
            prid: None,
            negotiation_id: None,
        };

        assert!(matches!(service.render_order(&order), Err(AppError::DocumentError(_))));
    }
}
