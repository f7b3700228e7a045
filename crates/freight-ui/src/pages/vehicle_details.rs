use chrono::NaiveDate;
use freight_types::display::{format_date, format_quantity, is_expired, is_expiring_soon};
use freight_types::{Branding, Vehicle};
use leptos::prelude::*;

use crate::components::badge::Badge;

/// CSS modifier for a document expiry date.
pub(crate) fn expiry_class(date: Option<NaiveDate>, today: NaiveDate) -> &'static str {
    if is_expired(date, today) {
        "expiry expired"
    } else if is_expiring_soon(date, today) {
        "expiry expiring"
    } else {
        "expiry"
    }
}

#[component]
pub(crate) fn ExpiryRow(label: &'static str, date: Option<NaiveDate>, today: NaiveDate) -> impl IntoView {
    view! {
        <div class="expiry-row">
            <span class="expiry-label">{label}</span>
            <span class=expiry_class(date, today)>{format_date(date)}</span>
        </div>
    }
}

#[component]
pub fn VehicleDetails(vehicle: Vehicle) -> impl IntoView {
    let branding = Branding::from_build_env();
    let today = chrono::Utc::now().date_naive();
    let warning = vehicle.compliance_warning(today);

    view! {
        <div class="detail-panel">
            <section class="detail-hero">
                <div class="vehicle-plate">{vehicle.vehicle_number.clone()}</div>
                <div class="detail-badges">
                    <Badge variant=vehicle.current_status.badge() label=vehicle.current_status.as_str() />
                    <span class="ownership">{vehicle.ownership_label(&branding.short_name())}</span>
                </div>
            </section>

            <section class="detail-section">
                <dl class="detail-grid">
                    <dt>"Vehicle Type"</dt>
                    <dd class="capitalize">{vehicle.vehicle_type.as_str()}</dd>
                    <dt>"Load Capacity"</dt>
                    <dd>{format!("{} Tons", format_quantity(vehicle.capacity_ton))}</dd>
                    <dt>"Owner Name"</dt>
                    <dd>{vehicle.owner_display(&branding.brand_name)}</dd>
                </dl>
            </section>

            <section class="detail-section">
                <h4>"Compliance & Document Expiry"</h4>
                <ExpiryRow label="RC Expiry" date=vehicle.rc_expiry today=today />
                <ExpiryRow label="Fitness Expiry" date=vehicle.fitness_expiry today=today />
                <ExpiryRow label="Insurance Expiry" date=vehicle.insurance_expiry today=today />
                <ExpiryRow label="Permit Expiry" date=vehicle.permit_expiry today=today />
                {warning.then(|| view! {
                    <div class="warning-banner">
                        "Critical compliance documents are expiring within 30 days. Please renew to avoid operation halts."
                    </div>
                })}
            </section>

            {vehicle.notes.clone().map(|notes| view! {
                <section class="detail-section">
                    <h4>"Notes"</h4>
                    <p>{notes}</p>
                </section>
            })}

            <footer class="detail-footer">
                <span>{format!("Registered ID: {}", vehicle.registry_code())}</span>
                <span>{format!("System Last Update: {}", vehicle.created_at.format("%d %b %Y"))}</span>
            </footer>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn expiry_class_tracks_thresholds() {
        let today = day(2026, 3, 1);
        assert_eq!(expiry_class(Some(day(2026, 2, 27)), today), "expiry expired");
        assert_eq!(expiry_class(Some(day(2026, 3, 20)), today), "expiry expiring");
        assert_eq!(expiry_class(Some(day(2026, 6, 1)), today), "expiry");
        assert_eq!(expiry_class(None, today), "expiry");
    }
}
