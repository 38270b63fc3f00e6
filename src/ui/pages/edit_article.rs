//! Edit page: loads the article and offers the form to its author only

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

use super::article_form::{ArticleForm, ArticleFormMode};
use crate::core::articles;
use crate::core::lifetime::LifetimeSlot;
use crate::core::models::{Article, ArticleDraft};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{ErrorMessage, LoadingSpinner};
use crate::ui::icon::{Icon, icons};
use crate::ui::use_lifetime;

#[component]
pub fn EditArticlePage() -> impl IntoView {
    let auth = use_auth_context();
    let lifetime = use_lifetime();
    let params = use_params_map();
    let navigate = use_navigate();

    let article = RwSignal::new(None::<Article>);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        if auth.is_resolved() && !auth.is_authenticated() {
            navigate("/login", Default::default());
        }
    });

    let loads = LifetimeSlot::new(&lifetime);
    Effect::new(move |_| {
        let id = params
            .read()
            .get("id")
            .and_then(|raw| articles::parse_article_id(&raw));
        let lifetime = loads.renew();
        article.set(None);
        let Some(id) = id else {
            error.set(Some("Article not found".to_string()));
            loading.set(false);
            return;
        };

        loading.set(true);
        error.set(None);
        let client = auth.client();
        spawn_local(async move {
            let Some(result) = lifetime.run(client.get_article(id)).await else {
                return;
            };
            match result {
                Ok(found) => article.set(Some(found)),
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    });

    view! {
        <section class="max-w-3xl mx-auto space-y-6">
            <h1 class="text-3xl font-bold text-theme-primary">"Edit article"</h1>

            <ErrorMessage error=error />

            <Show when=move || loading.get() || !auth.is_resolved()>
                <LoadingSpinner message="Loading article...".to_string() />
            </Show>

            {move || {
                if loading.get() || !auth.is_resolved() {
                    return None;
                }
                let a = article.get()?;
                let user = auth.user();
                let body = if articles::is_author(user.as_ref(), &a) {
                    view! {
                        <div class="card p-6">
                            <ArticleForm
                                mode=ArticleFormMode::Edit(a.id)
                                initial=ArticleDraft::from_article(&a)
                                current_image=a.image.clone()
                            />
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <div class="text-center py-16 space-y-4 text-theme-secondary">
                            <p>"You can only edit your own articles."</p>
                            <A href=format!("/articles/{}", a.id) attr:class="inline-flex items-center gap-1 text-accent-primary">
                                <Icon name=icons::ARROW_LEFT class="h-4 w-4" />
                                "Back to the article"
                            </A>
                        </div>
                    }.into_any()
                };
                Some(body)
            }}
        </section>
    }
}
