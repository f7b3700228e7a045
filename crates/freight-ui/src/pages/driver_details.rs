use freight_types::display::{format_date, or_placeholder};
use freight_types::Driver;
use leptos::prelude::*;

use super::vehicle_details::ExpiryRow;
use crate::components::badge::Badge;

#[component]
pub fn DriverDetails(driver: Driver) -> impl IntoView {
    let today = chrono::Utc::now().date_naive();
    let expiring = driver.license_expiring_soon(today);

    view! {
        <div class="detail-panel">
            <section class="detail-hero">
                <span class="avatar avatar-lg">{driver.initial()}</span>
                <div>
                    <h3>{driver.name.clone()}</h3>
                    <Badge variant=driver.status.badge() label=driver.status.as_str().replace('_', " ") />
                </div>
            </section>

            <section class="detail-section">
                <h4>"Contact"</h4>
                <dl class="detail-grid">
                    <dt>"Phone"</dt>
                    <dd><a href=format!("tel:{}", driver.phone)>{driver.phone.clone()}</a></dd>
                    <dt>"Address"</dt>
                    <dd>{or_placeholder(driver.address.as_deref())}</dd>
                    <dt>"Joined"</dt>
                    <dd>{format_date(Some(driver.joining_date))}</dd>
                </dl>
            </section>

            <section class="detail-section">
                <h4>"License"</h4>
                <dl class="detail-grid">
                    <dt>"License Number"</dt>
                    <dd class="mono">{or_placeholder(driver.license_number.as_deref())}</dd>
                </dl>
                <ExpiryRow label="License Expiry" date=driver.license_expiry today=today />
                {expiring.then(|| view! {
                    <div class="warning-banner">"Driving license expires within 30 days."</div>
                })}
            </section>

            {driver.notes.clone().map(|notes| view! {
                <section class="detail-section">
                    <h4>"Notes"</h4>
                    <p>{notes}</p>
                </section>
            })}

            <footer class="detail-footer">
                <span>{format!("Registered ID: {}", driver.registry_code())}</span>
            </footer>
        </div>
    }
}
