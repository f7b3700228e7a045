use leptos::prelude::*;

use super::section_wrapper::SectionWrapper;

const STEPS: [(&str, &str); 5] = [
    ("Quote", "Tell us your requirements and get a detailed, transparent quote from our team."),
    ("Planning", "Our experts design the most efficient route and schedule for your shipment."),
    ("Execution", "We handle the transport with care, ensuring your goods are moved safely."),
    ("Status Updates", "Get regular status updates on your shipment. Live tracking coming soon!"),
    ("Delivery", "Safe and timely arrival at your destination, followed by successful completion."),
];

/// Width of the progress line for a 1-based `active` step out of `total`.
pub fn progress_percent(active: usize, total: usize) -> f64 {
    if total <= 1 {
        return 100.0;
    }
    let active = active.clamp(1, total);
    (active - 1) as f64 / (total - 1) as f64 * 100.0
}

#[component]
pub fn ProcessStepper() -> impl IntoView {
    let (active, setActive) = signal(1usize);
    let progressStyle = move || format!("width: {}%", progress_percent(active.get(), STEPS.len()));

    view! {
        <SectionWrapper id="process" class="process">
            <div class="section-heading">
                <h2>"How We Operate"</h2>
                <p>"A seamless 5-step process designed for speed and reliability"</p>
            </div>
            <div class="stepper">
                <div class="stepper-line">
                    <div class="stepper-progress" style=progressStyle></div>
                </div>
                <ol class="stepper-steps">
                    {STEPS
                        .iter()
                        .enumerate()
                        .map(|(index, (title, _))| {
                            let step = index + 1;
                            view! {
                                <li
                                    class="stepper-step"
                                    class:active=move || active.get() == step
                                    class:done=move || { active.get() > step }
                                >
                                    <button on:click=move |_| setActive.set(step)>
                                        <span class="stepper-dot">{step}</span>
                                        <span class="stepper-title">{*title}</span>
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ol>
                <div class="stepper-detail">
                    {move || {
                        let (title, body) = STEPS[active.get() - 1];
                        view! {
                            <h3>{title}</h3>
                            <p>{body}</p>
                        }
                    }}
                </div>
            </div>
        </SectionWrapper>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_spans_first_to_last_step() {
        assert_eq!(progress_percent(1, 5), 0.0);
        assert_eq!(progress_percent(3, 5), 50.0);
        assert_eq!(progress_percent(5, 5), 100.0);
    }

    #[test]
    fn progress_clamps_out_of_range_steps() {
        assert_eq!(progress_percent(0, 5), 0.0);
        assert_eq!(progress_percent(9, 5), 100.0);
        assert_eq!(progress_percent(1, 1), 100.0);
    }
}
