use freight_types::display::{format_amount, format_quantity, BadgeVariant};
use freight_types::{Item, ItemType, Party, PriceOverride};
use leptos::prelude::*;

use super::item_details::ItemDetails;
use super::pricing_override_form::PricingOverrideForm;
use crate::components::badge::Badge;
use crate::components::skeleton::SkeletonRows;
use crate::components::slide_over::SlideOver;

#[component]
pub fn InventoryPage() -> impl IntoView {
    let search = RwSignal::new(String::new());
    let itemType = RwSignal::new(String::new());
    #[allow(unused_variables)]
    let (items, setItems) = signal(Option::<Result<Vec<Item>, String>>::None);
    #[allow(unused_variables)]
    let (customers, setCustomers) = signal(Vec::<Party>::new());
    #[allow(unused_variables)]
    let (overrides, setOverrides) = signal(Vec::<PriceOverride>::new());
    let selected = RwSignal::new(Option::<Item>::None);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            let result = crate::api::list_parties(freight_types::PartyType::Customer.as_str().to_string()).await;
            if let Ok(list) = result {
                setCustomers.set(list);
            }
        });

        Effect::new(move |_| {
            let needle = search.get();
            let wanted = itemType.get();
            spawn_local(async move {
                let result = crate::api::list_items(wanted, needle)
                    .await
                    .map_err(|e| crate::api::error_text(&e));
                setItems.set(Some(result));
            });
        });

        Effect::new(move |_| {
            let Some(itemId) = selected.with(|s| s.as_ref().map(|i| i.id)) else {
                setOverrides.set(Vec::new());
                return;
            };
            spawn_local(async move {
                if let Ok(list) = crate::api::list_price_overrides(itemId.to_string()).await {
                    setOverrides.set(list);
                }
            });
        });
    }

    let onSaved = move |rule: PriceOverride| {
        setOverrides.update(|all| {
            match all.iter_mut().find(|o| o.id == rule.id) {
                Some(existing) => *existing = rule,
                None => all.push(rule),
            }
        });
    };

    view! {
        <div class="dashboard-header">
            <div>
                <h1>"Inventory"</h1>
                <p class="subtitle">"Goods, services, stock levels and customer pricing"</p>
            </div>
        </div>

        <div class="filter-bar">
            <input class="search-input" type="search" placeholder="Search by name or code" bind:value=search />
            <select prop:value=move || itemType.get() on:change=move |ev| itemType.set(event_target_value(&ev))>
                <option value="">"All types"</option>
                {ItemType::ALL
                    .iter()
                    .map(|t| view! { <option value=t.as_str()>{t.as_str()}</option> })
                    .collect_view()}
            </select>
        </div>

        {move || match items.get() {
            None => view! { <SkeletonRows /> }.into_any(),
            Some(Err(e)) => view! { <div class="error-banner">{e}</div> }.into_any(),
            Some(Ok(list)) if list.is_empty() => view! { <div class="empty-state">"No items match"</div> }.into_any(),
            Some(Ok(list)) => view! {
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Item"</th>
                            <th>"Type"</th>
                            <th class="num">"Stock"</th>
                            <th class="num">"Base Price"</th>
                            <th class="num">"GST"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {list
                            .into_iter()
                            .map(|item| {
                                let forSelect = item.clone();
                                let lowStock = item.is_low_stock();
                                view! {
                                    <tr class="clickable" on:click=move |_| selected.set(Some(forSelect.clone()))>
                                        <td>
                                            <span class="strong">{item.name.clone()}</span>
                                            <span class="muted mono">{item.code.clone()}</span>
                                        </td>
                                        <td><Badge variant=item.item_type.badge() label=item.item_type.as_str() /></td>
                                        <td class="num">
                                            {format!("{} {}", format_quantity(item.current_stock), item.unit)}
                                            {lowStock.then(|| view! { <Badge variant=BadgeVariant::Error label="LOW" /> })}
                                        </td>
                                        <td class="num">{format_amount(item.base_price)}</td>
                                        <td class="num">{format!("{}%", format_quantity(item.tax_rate))}</td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            }
                .into_any(),
        }}

        <SlideOver
            open=Signal::derive(move || selected.with(Option::is_some))
            title=Signal::derive(move || selected.with(|s| s.as_ref().map(|i| i.name.clone()).unwrap_or_default()))
            on_close=move || selected.set(None)
        >
            {move || {
                selected
                    .get()
                    .map(|item| {
                        let itemId = item.id;
                        view! {
                            <ItemDetails item=item overrides=overrides parties=customers />
                            <PricingOverrideForm item_id=itemId customers=customers on_saved=onSaved />
                        }
                    })
            }}
        </SlideOver>
    }
}
