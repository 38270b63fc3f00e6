use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::ui::NavBar;
use crate::ui::auth::provide_auth_context;
use crate::ui::pages::{
    ArticleDetailPage, CreateArticlePage, EditArticlePage, ForgotPasswordPage, HomePage,
    LoginPage, NotFoundPage, RegisterPage, ResetPasswordPage,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body class="bg-theme-primary">
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Session, blog client and auth signals for every page
    provide_auth_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/inkpost.css"/>
        <Title text="Inkpost"/>

        <Router>
            <NavBar/>
            <main class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/register") view=RegisterPage/>
                    <Route path=path!("/forgot-password") view=ForgotPasswordPage/>
                    <Route path=path!("/reset-password/:token") view=ResetPasswordPage/>
                    <Route path=path!("/articles/:id") view=ArticleDetailPage/>
                    <Route path=path!("/create-article") view=CreateArticlePage/>
                    <Route path=path!("/edit-article/:id") view=EditArticlePage/>
                </Routes>
            </main>
        </Router>
    }
}
