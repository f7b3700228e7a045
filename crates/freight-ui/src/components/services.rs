use leptos::prelude::*;

use super::section_wrapper::SectionWrapper;
use super::service_card::ServiceCard;

const SERVICES: [(&str, &str, &str); 4] = [
    (
        "Road Transport",
        "Reliable and timely truck transport solutions for all types of industrial and commercial goods.",
        "\u{1F69A}",
    ),
    (
        "Trading & Sourcing",
        "Expert sourcing of essential goods and materials, ensuring quality and competitive pricing.",
        "\u{1F4E6}",
    ),
    (
        "Warehousing",
        "Secure storage facilities with efficient inventory handling for your regional operations.",
        "\u{1F3ED}",
    ),
    (
        "Logistics Support",
        "Comprehensive support for your supply chain, from documentation to final delivery.",
        "\u{1F4CB}",
    ),
];

#[component]
pub fn Services() -> impl IntoView {
    view! {
        <SectionWrapper id="services" class="services">
            <div class="section-heading">
                <h2>"Expert Solutions"</h2>
                <p>
                    "We provide dependable transport and trading services tailored to the unique needs of your business growth."
                </p>
            </div>
            <div class="service-grid">
                {SERVICES
                    .iter()
                    .map(|(title, description, icon)| {
                        view! { <ServiceCard title=*title description=*description icon=*icon /> }
                    })
                    .collect_view()}
            </div>
        </SectionWrapper>
    }
}
