use chrono::Datelike;
use freight_types::Branding;
use leptos::prelude::*;

use super::logo::Logo;

const COMPANY_LINKS: [(&str, &str); 4] = [
    ("About Us", "#story"),
    ("Our Services", "#services"),
    ("Work Process", "#process"),
    ("Contact", "#contact"),
];

const RESOURCE_LINKS: [(&str, &str); 4] = [
    ("Latest News", "#"),
    ("FAQ", "#"),
    ("Privacy Policy", "#"),
    ("Terms of Service", "#"),
];

fn link_list(links: &'static [(&'static str, &'static str)]) -> impl IntoView {
    view! {
        <ul class="footer-links">
            {links
                .iter()
                .map(|(label, href)| view! { <li><a href=*href>{*label}</a></li> })
                .collect_view()}
        </ul>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let branding = Branding::from_build_env();
    let year = chrono::Utc::now().year();

    view! {
        <footer class="site-footer">
            <div class="footer-grid">
                <div class="footer-brand">
                    <Logo />
                    <p>"Transport and trading partner for regional industry."</p>
                </div>
                <div>
                    <h4>"Company"</h4>
                    {link_list(&COMPANY_LINKS)}
                </div>
                <div>
                    <h4>"Resources"</h4>
                    {link_list(&RESOURCE_LINKS)}
                </div>
                <address class="footer-contact">
                    <h4>"Reach Us"</h4>
                    <p>{branding.address.clone()}</p>
                    <p><a href=format!("tel:{}", branding.phone)>{branding.phone.clone()}</a></p>
                    <p><a href=format!("mailto:{}", branding.email)>{branding.email.clone()}</a></p>
                </address>
            </div>
            <p class="footer-copyright">{branding.copyright(year)}</p>
        </footer>
    }
}
