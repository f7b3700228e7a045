use freight_types::{ContactChannel, ContactForm as ContactFields, FieldErrors};
use leptos::prelude::*;

use super::section_wrapper::SectionWrapper;
use super::toast::use_toast;

#[component]
pub fn ContactForm() -> impl IntoView {
    let toast = use_toast();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let company = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let channel = RwSignal::new(ContactChannel::Email.as_str().to_string());
    let errors = RwSignal::new(FieldErrors::new());
    let (sending, setSending) = signal(false);

    let fieldError = move |field: &'static str| {
        move || {
            errors.with(|e| e.get(field).map(str::to_string)).map(|message| {
                view! { <span class="field-error">{message}</span> }
            })
        }
    };

    let onSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let fields = ContactFields {
            name: name.get_untracked(),
            email: email.get_untracked(),
            company: company.get_untracked(),
            message: message.get_untracked(),
            channel: channel.get_untracked(),
        };
        if let Err(e) = fields.parse() {
            errors.set(e);
            return;
        }
        errors.set(FieldErrors::new());

        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;

            setSending.set(true);
            spawn_local(async move {
                let result = crate::api::submit_enquiry(
                    fields.name,
                    fields.email,
                    fields.company,
                    fields.message,
                    fields.channel,
                )
                .await;
                setSending.set(false);
                match result {
                    Ok(()) => {
                        toast.success("Thanks! Our team will get back to you shortly.");
                        for field in [name, email, company, message] {
                            field.set(String::new());
                        }
                    }
                    Err(e) => toast.error(crate::api::error_text(&e)),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (fields, toast, setSending);
        }
    };

    view! {
        <SectionWrapper id="contact" class="contact">
            <div class="section-heading">
                <h2>"Request a Quote"</h2>
                <p>"Tell us what needs moving and we will plan the rest."</p>
            </div>
            <form class="contact-form" on:submit=onSubmit novalidate>
                <div class="form-row">
                    <div class="form-group">
                        <label for="contact-name">"Name"</label>
                        <input id="contact-name" type="text" bind:value=name />
                        {fieldError("name")}
                    </div>
                    <div class="form-group">
                        <label for="contact-email">"Email"</label>
                        <input id="contact-email" type="email" bind:value=email />
                        {fieldError("email")}
                    </div>
                </div>
                <div class="form-group">
                    <label for="contact-company">"Company"</label>
                    <input id="contact-company" type="text" bind:value=company />
                    {fieldError("company")}
                </div>
                <div class="form-group">
                    <label for="contact-message">"Message"</label>
                    <textarea id="contact-message" rows="4" bind:value=message></textarea>
                    {fieldError("message")}
                </div>
                <fieldset class="form-group channel-choice">
                    <legend>"Preferred contact"</legend>
                    {ContactChannel::ALL
                        .iter()
                        .map(|option| {
                            let value = option.as_str();
                            view! {
                                <label class="radio">
                                    <input
                                        type="radio"
                                        name="channel"
                                        value=value
                                        prop:checked=move || channel.get() == value
                                        on:change=move |_| channel.set(value.to_string())
                                    />
                                    {match option {
                                        ContactChannel::Email => "Email",
                                        ContactChannel::Phone => "Phone",
                                    }}
                                </label>
                            }
                        })
                        .collect_view()}
                    {fieldError("channel")}
                </fieldset>
                <button type="submit" class="btn btn-primary" disabled=move || sending.get()>
                    {move || if sending.get() { "Sending..." } else { "Send Enquiry" }}
                </button>
            </form>
        </SectionWrapper>
    }
}
