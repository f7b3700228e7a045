use freight_types::display::format_amount;
use freight_types::{Item, Party, Voucher, VoucherFilter, VoucherStatus, VoucherType};
use leptos::portal::Portal;
use leptos::prelude::*;

use super::printable_voucher::PrintableVoucher;
use super::voucher_details::VoucherDetails;
use super::voucher_form::VoucherFormPanel;
use crate::components::badge::Badge;
use crate::components::skeleton::SkeletonRows;
use crate::components::slide_over::SlideOver;
use crate::components::toast::use_toast;

/// Delay between mounting the print portal and opening the print dialog,
/// so the portal content is laid out first.
const PRINT_DELAY: std::time::Duration = std::time::Duration::from_millis(100);

fn party_name(parties: &[Party], partyId: u64) -> String {
    parties
        .iter()
        .find(|p| p.id == partyId)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("Party #{partyId}"))
}

#[component]
pub fn VouchersPage() -> impl IntoView {
    #[allow(unused_variables)]
    let toast = use_toast();
    let filter = RwSignal::new(VoucherFilter::default());
    #[allow(unused_variables)]
    let (vouchers, setVouchers) = signal(Option::<Result<Vec<Voucher>, String>>::None);
    #[allow(unused_variables)]
    let (parties, setParties) = signal(Vec::<Party>::new());
    #[allow(unused_variables)]
    let (items, setItems) = signal(Vec::<Item>::new());
    let reload = RwSignal::new(0u32);
    let viewing = RwSignal::new(Option::<Voucher>::None);
    let creating = RwSignal::new(false);
    let printing = RwSignal::new(Option::<Voucher>::None);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            match crate::api::list_parties(String::new()).await {
                Ok(list) => setParties.set(list),
                Err(e) => toast.error(crate::api::error_text(&e)),
            }
            if let Ok(list) = crate::api::list_items(String::new(), String::new()).await {
                setItems.set(list);
            }
        });

        Effect::new(move |_| {
            let wanted = filter.get();
            reload.track();
            spawn_local(async move {
                let typeParam = wanted.voucher_type.map(|t| t.as_str().to_string()).unwrap_or_default();
                let result = crate::api::list_vouchers(typeParam)
                    .await
                    .map_err(|e| crate::api::error_text(&e));
                setVouchers.set(Some(result));
            });
        });
    }

    let printVoucher = move |voucher: Voucher| {
        printing.set(Some(voucher));
        #[cfg(feature = "hydrate")]
        {
            set_timeout(
                move || {
                    if window().print().is_err() {
                        leptos::logging::warn!("print dialog unavailable");
                    }
                    printing.set(None);
                },
                PRINT_DELAY,
            );
        }
    };

    #[allow(unused_variables)]
    let issueVoucher = move |id: u64| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;
            spawn_local(async move {
                match crate::api::set_voucher_status(id, VoucherStatus::Issued.as_str().to_string()).await {
                    Ok(voucher) => {
                        toast.success(format!("{} issued", voucher.display_number()));
                        viewing.set(Some(voucher));
                        reload.update(|n| *n += 1);
                    }
                    Err(e) => toast.error(crate::api::error_text(&e)),
                }
            });
        }
    };

    let filterButton = move |option: Option<VoucherType>| {
        let target = VoucherFilter::of(option);
        view! {
            <button
                class="filter-chip"
                class:active=move || filter.get() == target
                on:click=move |_| filter.set(target)
            >
                {target.label()}
            </button>
        }
    };

    view! {
        <div class="dashboard-header">
            <div>
                <h1>"Vouchers"</h1>
                <p class="subtitle">"Challans, invoices, bills and quotations"</p>
            </div>
            <button class="btn btn-primary" on:click=move |_| creating.set(true)>
                "+ Generate Voucher"
            </button>
        </div>

        <div class="filter-bar">
            {filterButton(None)}
            {VoucherType::ALL.iter().map(|t| filterButton(Some(*t))).collect_view()}
        </div>

        {move || match vouchers.get() {
            None => view! { <SkeletonRows rows=6 /> }.into_any(),
            Some(Err(e)) => view! { <div class="error-banner">{e}</div> }.into_any(),
            Some(Ok(list)) => {
                // A response for a previous filter can land after a newer click.
                let shown = filter.get().apply(&list);
                if shown.is_empty() {
                    view! { <div class="empty-state">"No vouchers in this stream yet"</div> }.into_any()
                } else {
                    let partyList = parties.get();
                    view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Number"</th>
                                    <th>"Date"</th>
                                    <th>"Type"</th>
                                    <th>"Party"</th>
                                    <th class="num">"Grand Total"</th>
                                    <th>"Status"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {shown
                                    .into_iter()
                                    .map(|voucher| {
                                        let forView = voucher.clone();
                                        let forPrint = voucher.clone();
                                        view! {
                                            <tr>
                                                <td class="mono">{voucher.display_number()}</td>
                                                <td>{voucher.voucher_date.format("%d %b %Y").to_string()}</td>
                                                <td>{voucher.voucher_type.title()}</td>
                                                <td>{party_name(&partyList, voucher.party_id)}</td>
                                                <td class="num">{format_amount(voucher.grand_total)}</td>
                                                <td>
                                                    <Badge variant=voucher.status.badge() label=voucher.status.as_str() />
                                                </td>
                                                <td class="row-actions">
                                                    <button class="btn btn-ghost btn-sm" on:click=move |_| viewing.set(Some(forView.clone()))>
                                                        "View"
                                                    </button>
                                                    <button class="btn btn-ghost btn-sm" on:click=move |_| printVoucher(forPrint.clone())>
                                                        "Print"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }
                        .into_any()
                }
            }
        }}

        <SlideOver
            open=Signal::derive(move || viewing.with(Option::is_some))
            title=Signal::derive(move || viewing.with(|v| v.as_ref().map(|v| v.voucher_type.title().to_string()).unwrap_or_default()))
            on_close=move || viewing.set(None)
        >
            {move || {
                viewing
                    .get()
                    .map(|voucher| {
                        let isDraft = voucher.status == VoucherStatus::Draft;
                        let id = voucher.id;
                        let forPrint = voucher.clone();
                        let partyName = parties.with(|all| party_name(all, voucher.party_id));
                        view! {
                            <VoucherDetails voucher=voucher party_name=partyName items=items.get() />
                            <div class="panel-actions">
                                <button class="btn btn-ghost" on:click=move |_| printVoucher(forPrint.clone())>
                                    "Print"
                                </button>
                                {isDraft.then(|| view! {
                                    <button class="btn btn-primary" on:click=move |_| issueVoucher(id)>"Issue Voucher"</button>
                                })}
                            </div>
                        }
                    })
            }}
        </SlideOver>

        <SlideOver
            open=creating
            title="Generate Voucher".to_string()
            on_close=move || creating.set(false)
        >
            <VoucherFormPanel
                parties=parties
                items=items
                on_created=move |_: Voucher| {
                    creating.set(false);
                    reload.update(|n| *n += 1);
                }
            />
        </SlideOver>

        <Portal>
            <div id="print-portal">
                {move || {
                    printing
                        .get()
                        .map(|voucher| {
                            let party = parties.with(|all| all.iter().find(|p| p.id == voucher.party_id).cloned());
                            view! { <PrintableVoucher voucher=voucher party=party items=items.get() /> }
                        })
                }}
            </div>
        </Portal>
    }
}
