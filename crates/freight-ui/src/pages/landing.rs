use leptos::prelude::*;

use crate::components::contact_form::ContactForm;
use crate::components::footer::Footer;
use crate::components::hero::Hero;
use crate::components::logo::Logo;
use crate::components::partners::Partners;
use crate::components::process_stepper::ProcessStepper;
use crate::components::section_wrapper::SectionWrapper;
use crate::components::services::Services;
use crate::components::story_scroll::StoryScroll;
use crate::components::tooltip::Tooltip;

const HIGHLIGHTS: [(&str, &str); 3] = [
    ("24/7", "Dispatch desk for urgent loads"),
    ("120+", "Regional destinations served"),
    ("98%", "On-time delivery record"),
];

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="landing">
            <div class="topbar">
                <Logo large=true />
                <nav class="topbar-links">
                    <a href="#services">"Services"</a>
                    <a href="#process">"Process"</a>
                    <a href="#contact">"Contact"</a>
                    <Tooltip text="Back office for staff accounts">
                        <a href="/login" class="btn btn-ghost">"Staff Login"</a>
                    </Tooltip>
                </nav>
            </div>
            <Hero />
            <Partners />
            <SectionWrapper id="why-us" class="highlights">
                <div class="highlight-grid">
                    {HIGHLIGHTS
                        .iter()
                        .map(|(figure, caption)| {
                            view! {
                                <div class="highlight">
                                    <strong>{*figure}</strong>
                                    <span>{*caption}</span>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </SectionWrapper>
            <StoryScroll />
            <Services />
            <ProcessStepper />
            <ContactForm />
            <Footer />
        </div>
    }
}
