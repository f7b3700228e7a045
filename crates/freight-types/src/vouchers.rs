use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::display::BadgeVariant;
use crate::validation::{
    check_non_negative, non_blank, optional_parse, required_parse, round2, FieldErrors, NOT_A_NUMBER,
};

string_enum! {
    pub enum VoucherType("voucher type") {
        Challan => "challan",
        Invoice => "invoice",
        Bill => "bill",
        Quotation => "quotation",
    }
}

impl Default for VoucherType {
    fn default() -> Self {
        VoucherType::Challan
    }
}

impl VoucherType {
    pub fn number_prefix(&self) -> &'static str {
        match self {
            VoucherType::Challan => "CHL",
            VoucherType::Invoice => "INV",
            VoucherType::Bill => "BIL",
            VoucherType::Quotation => "QTN",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            VoucherType::Challan => "Delivery Challan",
            VoucherType::Invoice => "Tax Invoice",
            VoucherType::Bill => "Purchase Bill",
            VoucherType::Quotation => "Quotation",
        }
    }

    /// Sign applied to line quantities when the voucher is issued:
    /// outgoing goods leave stock, purchases add to it.
    pub fn stock_direction(&self) -> Option<f64> {
        match self {
            VoucherType::Challan | VoucherType::Invoice => Some(-1.0),
            VoucherType::Bill => Some(1.0),
            VoucherType::Quotation => None,
        }
    }
}

string_enum! {
    pub enum VoucherStatus("voucher status") {
        Draft => "draft",
        Issued => "issued",
        Cancelled => "cancelled",
    }
}

impl Default for VoucherStatus {
    fn default() -> Self {
        VoucherStatus::Draft
    }
}

impl VoucherStatus {
    /// Only issued vouchers are highlighted in lists.
    pub fn badge(&self) -> BadgeVariant {
        match self {
            VoucherStatus::Issued => BadgeVariant::Success,
            _ => BadgeVariant::Neutral,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VoucherLine {
    pub id: u64,
    pub item_id: u64,
    pub quantity: f64,
    pub rate: f64,
    pub tax_rate: f64,
    pub amount: f64,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Voucher {
    pub id: u64,
    pub voucher_number: String,
    pub voucher_type: VoucherType,
    pub voucher_date: NaiveDate,
    pub party_id: u64,
    pub vehicle_number: Option<String>,
    pub driver_name: Option<String>,
    pub place_of_supply: Option<String>,
    pub total_amount: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
    pub status: VoucherStatus,
    pub notes: Option<String>,
    pub items: Vec<VoucherLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Voucher {
    pub fn display_number(&self) -> String {
        if self.voucher_number.trim().is_empty() {
            format!("VCH-{}", self.id)
        } else {
            self.voucher_number.clone()
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewVoucherLine {
    pub item_id: u64,
    pub quantity: f64,
    pub rate: f64,
    #[serde(default)]
    pub tax_rate: f64,
    pub description: Option<String>,
}

impl NewVoucherLine {
    pub fn amount(&self) -> f64 {
        round2(self.quantity * self.rate)
    }

    pub fn tax(&self) -> f64 {
        round2(self.amount() * self.tax_rate / 100.0)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct VoucherTotals {
    pub total_amount: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
}

impl VoucherTotals {
    pub fn compute(lines: &[NewVoucherLine]) -> Self {
        let total: f64 = lines.iter().map(NewVoucherLine::amount).sum();
        let tax: f64 = lines.iter().map(NewVoucherLine::tax).sum();
        Self {
            total_amount: round2(total),
            tax_amount: round2(tax),
            grand_total: round2(total + tax),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewVoucher {
    pub voucher_number: Option<String>,
    #[serde(default)]
    pub voucher_type: VoucherType,
    pub voucher_date: NaiveDate,
    pub party_id: u64,
    pub vehicle_number: Option<String>,
    pub driver_name: Option<String>,
    pub place_of_supply: Option<String>,
    #[serde(default)]
    pub status: VoucherStatus,
    pub notes: Option<String>,
    pub items: Vec<NewVoucherLine>,
}

impl NewVoucher {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.party_id == 0 {
            errors.add("party_id", "Party is required");
        }
        if self.items.is_empty() {
            errors.add("items", "Add at least one line item");
        }
        for (idx, line) in self.items.iter().enumerate() {
            if line.item_id == 0 {
                errors.add(&format!("items[{idx}].item_id"), "Item is required");
            }
            let quantityField = format!("items[{idx}].quantity");
            if !line.quantity.is_finite() {
                errors.add(&quantityField, NOT_A_NUMBER);
            } else if line.quantity <= 0.0 {
                errors.add(&quantityField, "Quantity must be greater than 0");
            }
            check_non_negative(&mut errors, &format!("items[{idx}].rate"), line.rate, "Rate must be positive");
            check_non_negative(
                &mut errors,
                &format!("items[{idx}].tax_rate"),
                line.tax_rate,
                "Tax rate cannot be negative",
            );
        }
        errors.finish(())
    }
}

/// Only status and notes can change after creation.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct VoucherUpdate {
    pub status: Option<VoucherStatus>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct VoucherLineForm {
    pub item_id: String,
    pub quantity: String,
    pub rate: String,
    pub tax_rate: String,
}

/// Raw inputs of the "generate voucher" form.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct VoucherForm {
    pub voucher_type: String,
    pub voucher_date: String,
    pub party_id: String,
    pub vehicle_number: String,
    pub driver_name: String,
    pub place_of_supply: String,
    pub notes: String,
    pub issue_now: bool,
    pub lines: Vec<VoucherLineForm>,
}

impl VoucherForm {
    pub fn parse(&self) -> Result<NewVoucher, FieldErrors> {
        let mut errors = FieldErrors::new();
        let voucherType = match self.voucher_type.parse::<VoucherType>() {
            Ok(t) => t,
            Err(_) => {
                errors.add("voucher_type", "Select a voucher type");
                VoucherType::default()
            }
        };
        let voucherDate: Option<NaiveDate> = required_parse(
            &mut errors,
            "voucher_date",
            &self.voucher_date,
            "Date is required",
            "Date must be YYYY-MM-DD",
        );
        let partyId: Option<u64> = required_parse(
            &mut errors,
            "party_id",
            &self.party_id,
            "Party is required",
            "Party is required",
        );

        let mut lines = Vec::with_capacity(self.lines.len());
        for (idx, line) in self.lines.iter().enumerate() {
            let itemId: Option<u64> = required_parse(
                &mut errors,
                &format!("items[{idx}].item_id"),
                &line.item_id,
                "Item is required",
                "Item is required",
            );
            let quantity: Option<f64> = required_parse(
                &mut errors,
                &format!("items[{idx}].quantity"),
                &line.quantity,
                "Quantity is required",
                "Quantity must be a number",
            );
            let rate: Option<f64> = required_parse(
                &mut errors,
                &format!("items[{idx}].rate"),
                &line.rate,
                "Rate is required",
                "Rate must be a number",
            );
            let taxRate: Option<f64> = optional_parse(
                &mut errors,
                &format!("items[{idx}].tax_rate"),
                &line.tax_rate,
                "Tax rate must be a number",
            );
            lines.push(NewVoucherLine {
                item_id: itemId.unwrap_or(0),
                quantity: quantity.unwrap_or(0.0),
                rate: rate.unwrap_or(0.0),
                tax_rate: taxRate.unwrap_or(0.0),
                description: None,
            });
        }

        let voucher = NewVoucher {
            voucher_number: None,
            voucher_type: voucherType,
            voucher_date: voucherDate.unwrap_or_default(),
            party_id: partyId.unwrap_or(0),
            vehicle_number: non_blank(&self.vehicle_number).map(|v| v.to_uppercase()),
            driver_name: non_blank(&self.driver_name),
            place_of_supply: non_blank(&self.place_of_supply),
            status: if self.issue_now {
                VoucherStatus::Issued
            } else {
                VoucherStatus::Draft
            },
            notes: non_blank(&self.notes),
            items: lines,
        };
        if let Err(more) = voucher.validate() {
            for (field, message) in more.iter() {
                errors.add(field, message);
            }
        }
        errors.finish(voucher)
    }
}

/// Narrowing applied to the voucher list; `None` shows every type.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoucherFilter {
    pub voucher_type: Option<VoucherType>,
}

impl VoucherFilter {
    pub fn of(voucherType: Option<VoucherType>) -> Self {
        Self {
            voucher_type: voucherType,
        }
    }

    pub fn matches(&self, voucher: &Voucher) -> bool {
        self.voucher_type
            .map_or(true, |wanted| voucher.voucher_type == wanted)
    }

    pub fn apply(&self, vouchers: &[Voucher]) -> Vec<Voucher> {
        vouchers.iter().filter(|v| self.matches(v)).cloned().collect()
    }

    pub fn label(&self) -> &'static str {
        self.voucher_type.map_or("All Streams", |t| t.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn voucher(id: u64, voucherType: VoucherType) -> Voucher {
        let ts = Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap();
        Voucher {
            id,
            voucher_number: format!("{}-20260201-{id:03}", voucherType.number_prefix()),
            voucher_type: voucherType,
            voucher_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            party_id: 1,
            vehicle_number: None,
            driver_name: None,
            place_of_supply: None,
            total_amount: 0.0,
            tax_amount: 0.0,
            grand_total: 0.0,
            status: VoucherStatus::Draft,
            notes: None,
            items: Vec::new(),
            created_at: ts,
            updated_at: ts,
        }
    }

    fn form() -> VoucherForm {
        VoucherForm {
            voucher_type: "invoice".into(),
            voucher_date: "2026-02-14".into(),
            party_id: "4".into(),
            vehicle_number: "wb34ab1234".into(),
            lines: vec![VoucherLineForm {
                item_id: "2".into(),
                quantity: "10".into(),
                rate: "395".into(),
                tax_rate: "28".into(),
            }],
            ..VoucherForm::default()
        }
    }

    #[test]
    fn filter_narrows_to_selected_type() {
        let all = vec![
            voucher(1, VoucherType::Challan),
            voucher(2, VoucherType::Invoice),
            voucher(3, VoucherType::Invoice),
            voucher(4, VoucherType::Quotation),
        ];

        let invoices = VoucherFilter::of(Some(VoucherType::Invoice)).apply(&all);
        assert_eq!(invoices.iter().map(|v| v.id).collect::<Vec<_>>(), vec![2, 3]);

        assert!(VoucherFilter::of(Some(VoucherType::Bill)).apply(&all).is_empty());
        assert_eq!(VoucherFilter::default().apply(&all).len(), 4);
        assert_eq!(VoucherFilter::default().label(), "All Streams");
    }

    #[test]
    fn totals_round_each_line() {
        let lines = vec![
            NewVoucherLine {
                item_id: 1,
                quantity: 3.0,
                rate: 33.333,
                tax_rate: 18.0,
                description: None,
            },
            NewVoucherLine {
                item_id: 2,
                quantity: 2.0,
                rate: 50.0,
                tax_rate: 0.0,
                description: None,
            },
        ];
        let totals = VoucherTotals::compute(&lines);
        assert_eq!(totals.total_amount, 200.0);
        assert_eq!(totals.tax_amount, 18.0);
        assert_eq!(totals.grand_total, 218.0);
    }

    #[test]
    fn voucher_form_parses_lines() {
        let voucher = form().parse().expect("valid");
        assert_eq!(voucher.voucher_type, VoucherType::Invoice);
        assert_eq!(voucher.vehicle_number.as_deref(), Some("WB34AB1234"));
        assert_eq!(voucher.status, VoucherStatus::Draft);
        assert_eq!(voucher.items[0].amount(), 3950.0);
        assert_eq!(voucher.items[0].tax(), 1106.0);
    }

    #[test]
    fn voucher_form_rejects_empty_lines_and_zero_quantity() {
        let errors = VoucherForm {
            lines: Vec::new(),
            ..form()
        }
        .parse()
        .unwrap_err();
        assert!(errors.has("items"));

        let mut bad = form();
        bad.lines[0].quantity = "0".into();
        bad.lines[0].rate = "-1".into();
        let errors = bad.parse().unwrap_err();
        assert!(errors.has("items[0].quantity"));
        assert!(errors.has("items[0].rate"));
    }

    #[test]
    fn voucher_form_rejects_nan_and_infinity() {
        let mut bad = form();
        bad.lines[0].quantity = "inf".into();
        bad.lines[0].rate = "NaN".into();
        bad.lines[0].tax_rate = "-inf".into();
        let errors = bad.parse().unwrap_err();
        assert_eq!(errors.get("items[0].quantity"), Some(NOT_A_NUMBER));
        assert_eq!(errors.get("items[0].rate"), Some(NOT_A_NUMBER));
        assert_eq!(errors.get("items[0].tax_rate"), Some(NOT_A_NUMBER));
    }

    #[test]
    fn stock_direction_by_type() {
        assert_eq!(VoucherType::Invoice.stock_direction(), Some(-1.0));
        assert_eq!(VoucherType::Challan.stock_direction(), Some(-1.0));
        assert_eq!(VoucherType::Bill.stock_direction(), Some(1.0));
        assert_eq!(VoucherType::Quotation.stock_direction(), None);
    }
}
