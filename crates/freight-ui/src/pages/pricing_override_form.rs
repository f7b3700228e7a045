use freight_types::{FieldErrors, Party, PriceOverride, PriceOverrideForm as OverrideFields};
use leptos::prelude::*;

use crate::components::toast::use_toast;

/// Adds or replaces a customer-specific rate for one item.
#[component]
pub fn PricingOverrideForm<F>(
    item_id: u64,
    #[prop(into)] customers: Signal<Vec<Party>>,
    on_saved: F,
) -> impl IntoView
where
    F: Fn(PriceOverride) + Clone + Send + Sync + 'static,
{
    #[allow(unused_variables)]
    let toast = use_toast();
    let initial = OverrideFields::for_item(item_id);
    let partyId = RwSignal::new(initial.party_id);
    let rate = RwSignal::new(initial.rate);
    let location = RwSignal::new(initial.location);
    let errors = RwSignal::new(FieldErrors::new());
    let (saving, setSaving) = signal(false);

    let fieldError = move |field: &'static str| {
        move || {
            errors
                .with(|e| e.get(field).map(str::to_string))
                .map(|message| view! { <span class="field-error">{message}</span> })
        }
    };

    let onSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let fields = OverrideFields {
            item_id: item_id.to_string(),
            party_id: partyId.get_untracked(),
            rate: rate.get_untracked(),
            location: location.get_untracked(),
        };
        if let Err(e) = fields.parse() {
            errors.set(e);
            return;
        }
        errors.set(FieldErrors::new());

        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;

            let onSaved = on_saved.clone();
            setSaving.set(true);
            spawn_local(async move {
                let result =
                    crate::api::save_price_override(fields.item_id, fields.party_id, fields.rate, fields.location)
                        .await;
                setSaving.set(false);
                match result {
                    Ok(rule) => {
                        toast.success("Price override saved");
                        rate.set(String::new());
                        onSaved(rule);
                    }
                    Err(e) => toast.error(crate::api::error_text(&e)),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (fields, &on_saved, setSaving);
        }
    };

    view! {
        <form class="override-form" on:submit=onSubmit novalidate>
            <h4>"Add Price Override"</h4>
            <div class="form-group">
                <label>"Customer"</label>
                <select prop:value=move || partyId.get() on:change=move |ev| partyId.set(event_target_value(&ev))>
                    <option value="">"Select customer"</option>
                    <For each=move || customers.get() key=|p| p.id let:party>
                        <option value=party.id.to_string()>{party.name.clone()}</option>
                    </For>
                </select>
                {fieldError("party_id")}
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label>"Rate"</label>
                    <input type="number" min="0" step="any" bind:value=rate />
                    {fieldError("rate")}
                </div>
                <div class="form-group">
                    <label>"Location"</label>
                    <input type="text" placeholder="default" bind:value=location />
                </div>
            </div>
            <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                {move || if saving.get() { "Saving..." } else { "Save Override" }}
            </button>
        </form>
    }
}
