use freight_types::display::format_date;
use freight_types::{Driver, Vehicle};
use leptos::prelude::*;

use super::driver_details::DriverDetails;
use super::vehicle_details::VehicleDetails;
use crate::components::badge::Badge;
use crate::components::skeleton::SkeletonRows;
use crate::components::slide_over::SlideOver;

#[derive(Clone, Copy, PartialEq)]
enum FleetTab {
    Drivers,
    Vehicles,
}

#[derive(Clone)]
enum Selection {
    Driver(Driver),
    Vehicle(Vehicle),
}

#[component]
pub fn FleetPage() -> impl IntoView {
    let tab = RwSignal::new(FleetTab::Vehicles);
    #[allow(unused_variables)]
    let (drivers, setDrivers) = signal(Option::<Result<Vec<Driver>, String>>::None);
    #[allow(unused_variables)]
    let (vehicles, setVehicles) = signal(Option::<Result<Vec<Vehicle>, String>>::None);
    let selected = RwSignal::new(Option::<Selection>::None);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            let result = crate::api::list_vehicles().await.map_err(|e| crate::api::error_text(&e));
            setVehicles.set(Some(result));
            let result = crate::api::list_drivers().await.map_err(|e| crate::api::error_text(&e));
            setDrivers.set(Some(result));
        });
    }

    let today = chrono::Utc::now().date_naive();

    let tabButton = move |target: FleetTab, label: &'static str| {
        view! {
            <button class="filter-chip" class:active=move || tab.get() == target on:click=move |_| tab.set(target)>
                {label}
            </button>
        }
    };

    let vehicleTable = move || match vehicles.get() {
        None => view! { <SkeletonRows /> }.into_any(),
        Some(Err(e)) => view! { <div class="error-banner">{e}</div> }.into_any(),
        Some(Ok(list)) if list.is_empty() => view! { <div class="empty-state">"No vehicles registered"</div> }.into_any(),
        Some(Ok(list)) => view! {
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Vehicle"</th>
                        <th>"Type"</th>
                        <th class="num">"Capacity"</th>
                        <th>"Insurance"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {list
                        .into_iter()
                        .map(|vehicle| {
                            let flagged = vehicle.compliance_warning(today);
                            let forSelect = vehicle.clone();
                            view! {
                                <tr class="clickable" on:click=move |_| selected.set(Some(Selection::Vehicle(forSelect.clone())))>
                                    <td class="mono">
                                        {vehicle.vehicle_number.clone()}
                                        {flagged.then(|| view! { <span class="flag" title="Documents expiring soon">"!"</span> })}
                                    </td>
                                    <td class="capitalize">{vehicle.vehicle_type.as_str()}</td>
                                    <td class="num">{format!("{} T", vehicle.capacity_ton)}</td>
                                    <td>{format_date(vehicle.insurance_expiry)}</td>
                                    <td><Badge variant=vehicle.current_status.badge() label=vehicle.current_status.as_str() /></td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        }
            .into_any(),
    };

    let driverTable = move || match drivers.get() {
        None => view! { <SkeletonRows /> }.into_any(),
        Some(Err(e)) => view! { <div class="error-banner">{e}</div> }.into_any(),
        Some(Ok(list)) if list.is_empty() => view! { <div class="empty-state">"No drivers registered"</div> }.into_any(),
        Some(Ok(list)) => view! {
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Driver"</th>
                        <th>"Phone"</th>
                        <th>"License Expiry"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {list
                        .into_iter()
                        .map(|driver| {
                            let expiring = driver.license_expiring_soon(today);
                            let forSelect = driver.clone();
                            view! {
                                <tr class="clickable" on:click=move |_| selected.set(Some(Selection::Driver(forSelect.clone())))>
                                    <td>
                                        <div class="user-cell">
                                            <span class="avatar">{driver.initial()}</span>
                                            <span class="strong">{driver.name.clone()}</span>
                                        </div>
                                    </td>
                                    <td>{driver.phone.clone()}</td>
                                    <td class:expiring=expiring>{format_date(driver.license_expiry)}</td>
                                    <td><Badge variant=driver.status.badge() label=driver.status.as_str() /></td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        }
            .into_any(),
    };

    let panelTitle = Signal::derive(move || {
        selected.with(|s| match s {
            Some(Selection::Driver(d)) => d.name.clone(),
            Some(Selection::Vehicle(v)) => v.vehicle_number.clone(),
            None => String::new(),
        })
    });

    view! {
        <div class="dashboard-header">
            <div>
                <h1>"Fleet"</h1>
                <p class="subtitle">"Vehicles, drivers and document compliance"</p>
            </div>
        </div>

        <div class="filter-bar">
            {tabButton(FleetTab::Vehicles, "Vehicles")}
            {tabButton(FleetTab::Drivers, "Drivers")}
        </div>

        {move || match tab.get() {
            FleetTab::Vehicles => vehicleTable().into_any(),
            FleetTab::Drivers => driverTable().into_any(),
        }}

        <SlideOver
            open=Signal::derive(move || selected.with(Option::is_some))
            title=panelTitle
            on_close=move || selected.set(None)
        >
            {move || match selected.get() {
                Some(Selection::Driver(driver)) => view! { <DriverDetails driver=driver /> }.into_any(),
                Some(Selection::Vehicle(vehicle)) => view! { <VehicleDetails vehicle=vehicle /> }.into_any(),
                None => ().into_any(),
            }}
        </SlideOver>
    }
}
