use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Outlet, ParentRoute, Redirect, Route, Router, Routes},
    StaticSegment,
};

use crate::auth::AuthProvider;
use crate::components::nav::Nav;
use crate::components::toast::ToastProvider;
use crate::pages::change_password::ChangePasswordPage;
use crate::pages::fleet::FleetPage;
use crate::pages::inventory::InventoryPage;
use crate::pages::landing::LandingPage;
use crate::pages::login::LoginPage;
use crate::pages::users::UsersPage;
use crate::pages::vouchers::VouchersPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let brand = freight_types::Branding::from_build_env().brand_name;

    view! {
        <Stylesheet id="leptos" href="/pkg/freight-console.css" />
        <Title text=brand />
        <ToastProvider>
            <AuthProvider>
                <Router>
                    <Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }.into_any()>
                        <Route path=StaticSegment("") view=LandingPage />
                        <Route path=StaticSegment("login") view=LoginPage />
                        <Route path=StaticSegment("change-password") view=ChangePasswordPage />
                        <ParentRoute path=StaticSegment("admin") view=AdminLayout>
                            <Route path=StaticSegment("") view=|| view! { <Redirect path="/admin/vouchers" /> } />
                            <Route path=StaticSegment("vouchers") view=VouchersPage />
                            <Route path=StaticSegment("users") view=UsersPage />
                            <Route path=StaticSegment("fleet") view=FleetPage />
                            <Route path=StaticSegment("inventory") view=InventoryPage />
                        </ParentRoute>
                    </Routes>
                </Router>
            </AuthProvider>
        </ToastProvider>
    }
}

#[component]
fn AdminLayout() -> impl IntoView {
    view! {
        <div class="app-layout">
            <Nav />
            <main class="main-content">
                <Outlet />
            </main>
        </div>
    }
}
