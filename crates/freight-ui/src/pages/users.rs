use freight_types::{FieldErrors, User, UserForm, UserRole};
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::badge::Badge;
use crate::components::skeleton::SkeletonRows;
use crate::components::slide_over::SlideOver;
use crate::components::toast::use_toast;

#[component]
pub fn UsersPage() -> impl IntoView {
    #[allow(unused_variables)]
    let toast = use_toast();
    let auth = use_auth();
    #[allow(unused_variables)]
    let (users, setUsers) = signal(Option::<Result<Vec<User>, String>>::None);
    let reload = RwSignal::new(0u32);
    let registering = RwSignal::new(false);
    #[allow(unused_variables)]
    let (busyId, setBusyId) = signal(Option::<u64>::None);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        Effect::new(move |_| {
            reload.track();
            spawn_local(async move {
                let result = crate::api::list_users().await.map_err(|e| crate::api::error_text(&e));
                setUsers.set(Some(result));
            });
        });
    }

    #[allow(unused_variables)]
    let toggleActive = move |user: User| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;

            let activate = !user.active;
            setBusyId.set(Some(user.id));
            spawn_local(async move {
                let result = crate::api::set_user_active(user.id, activate).await;
                setBusyId.set(None);
                match result {
                    Ok(updated) if activate => {
                        toast.success(format!("{} activated", updated.display_name()))
                    }
                    Ok(updated) => toast.warning(format!("{} deactivated", updated.display_name())),
                    Err(e) => toast.error(crate::api::error_text(&e)),
                }
                reload.update(|n| *n += 1);
            });
        }
    };

    let isAdmin = move || auth.user().is_some_and(|u| u.role == UserRole::Admin);

    view! {
        <div class="dashboard-header">
            <div>
                <h1>"Users"</h1>
                <p class="subtitle">"Staff accounts and access"</p>
            </div>
            {move || isAdmin().then(|| view! {
                <button class="btn btn-primary" on:click=move |_| registering.set(true)>"+ Register User"</button>
            })}
        </div>

        {move || match users.get() {
            None => view! { <SkeletonRows rows=4 /> }.into_any(),
            Some(Err(e)) => view! { <div class="error-banner">{e}</div> }.into_any(),
            Some(Ok(list)) if list.is_empty() => {
                view! { <div class="empty-state">"No users registered"</div> }.into_any()
            }
            Some(Ok(list)) => {
                let currentId = auth.user().map(|u| u.id);
                let busy = busyId.get();
                view! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"User"</th>
                                <th>"Email"</th>
                                <th>"Role"</th>
                                <th>"Status"</th>
                                <th>"Last Login"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .into_iter()
                                .map(|user| {
                                    let isSelf = currentId == Some(user.id);
                                    let isBusy = busy == Some(user.id);
                                    let statusVariant = if user.active {
                                        freight_types::display::BadgeVariant::Success
                                    } else {
                                        freight_types::display::BadgeVariant::Neutral
                                    };
                                    let lastLogin = user
                                        .last_login
                                        .map(|t| t.format("%d %b %Y %H:%M").to_string())
                                        .unwrap_or_else(|| "Never".to_string());
                                    let toggleLabel = if user.active { "Deactivate" } else { "Activate" };
                                    let forToggle = user.clone();
                                    view! {
                                        <tr>
                                            <td>
                                                <div class="user-cell">
                                                    <span class="avatar">{user.initial()}</span>
                                                    <div>
                                                        <span class="strong">{user.display_name().to_string()}</span>
                                                        <span class="muted">{format!("@{}", user.username)}</span>
                                                    </div>
                                                </div>
                                            </td>
                                            <td>{user.email.clone()}</td>
                                            <td><Badge variant=user.role.badge() label=user.role.as_str() /></td>
                                            <td><Badge variant=statusVariant label=user.status_label() /></td>
                                            <td>{lastLogin}</td>
                                            <td class="row-actions">
                                                {(isAdmin() && !isSelf).then(|| view! {
                                                    <button
                                                        class="btn btn-ghost btn-sm"
                                                        disabled=isBusy
                                                        on:click=move |_| toggleActive(forToggle.clone())
                                                    >
                                                        {toggleLabel}
                                                    </button>
                                                })}
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
        }}

        <SlideOver open=registering title="Register User".to_string() on_close=move || registering.set(false)>
            <RegisterUserForm on_registered=move || {
                registering.set(false);
                reload.update(|n| *n += 1);
            } />
        </SlideOver>
    }
}

#[component]
fn RegisterUserForm<F>(on_registered: F) -> impl IntoView
where
    F: Fn() + Clone + Send + Sync + 'static,
{
    #[allow(unused_variables)]
    let toast = use_toast();
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let fullName = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let role = RwSignal::new(UserRole::User.as_str().to_string());
    let errors = RwSignal::new(FieldErrors::new());

    let fieldError = move |field: &'static str| {
        move || {
            errors
                .with(|e| e.get(field).map(str::to_string))
                .map(|message| view! { <span class="field-error">{message}</span> })
        }
    };

    let onSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = UserForm {
            username: username.get_untracked(),
            email: email.get_untracked(),
            full_name: fullName.get_untracked(),
            phone_number: phone.get_untracked(),
            role: role.get_untracked(),
        };
        if let Err(e) = form.parse() {
            errors.set(e);
            return;
        }
        errors.set(FieldErrors::new());

        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;

            let onRegistered = on_registered.clone();
            spawn_local(async move {
                let result = crate::api::register_user(
                    form.username,
                    form.email,
                    form.full_name,
                    form.phone_number,
                    form.role,
                )
                .await;
                match result {
                    Ok(user) => {
                        toast.success(format!(
                            "{} registered; they must change the default password on first sign-in",
                            user.username
                        ));
                        for field in [username, email, fullName, phone] {
                            field.set(String::new());
                        }
                        onRegistered();
                    }
                    Err(e) => toast.error(crate::api::error_text(&e)),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (form, &on_registered);
        }
    };

    view! {
        <form class="register-form" on:submit=onSubmit novalidate>
            <div class="form-group">
                <label>"Username"</label>
                <input type="text" bind:value=username />
                {fieldError("username")}
            </div>
            <div class="form-group">
                <label>"Email"</label>
                <input type="email" bind:value=email />
                {fieldError("email")}
            </div>
            <div class="form-group">
                <label>"Full Name"</label>
                <input type="text" bind:value=fullName />
            </div>
            <div class="form-group">
                <label>"Phone"</label>
                <input type="tel" bind:value=phone />
                {fieldError("phone_number")}
            </div>
            <div class="form-group">
                <label>"Role"</label>
                <select prop:value=move || role.get() on:change=move |ev| role.set(event_target_value(&ev))>
                    {UserRole::ALL
                        .iter()
                        .map(|r| view! { <option value=r.as_str()>{r.as_str()}</option> })
                        .collect_view()}
                </select>
                {fieldError("role")}
            </div>
            <button type="submit" class="btn btn-primary">"Register"</button>
        </form>
    }
}
