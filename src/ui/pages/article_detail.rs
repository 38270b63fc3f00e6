//! Article page: full content, plus edit and delete for its author

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::core::articles::{self, format_timestamp};
use crate::core::lifetime::LifetimeSlot;
use crate::core::models::Article;
use crate::ui::auth::{Avatar, use_auth_context};
use crate::ui::common::{ConfirmDialog, ErrorMessage, LoadingSpinner};
use crate::ui::icon::{Icon, icons};
use crate::ui::use_lifetime;

const INVALID_ID: &str = "Article not found";

/// Article detail page component
#[component]
pub fn ArticleDetailPage() -> impl IntoView {
    let auth = use_auth_context();
    let lifetime = use_lifetime();
    let params = use_params_map();
    let navigate = use_navigate();

    let article = RwSignal::new(None::<Article>);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let confirm_open = RwSignal::new(false);
    let deleting = RwSignal::new(false);
    let deleted = RwSignal::new(false);

    let article_id = move || {
        params
            .read()
            .get("id")
            .and_then(|raw| articles::parse_article_id(&raw))
    };

    // Load whenever the route id changes; a newer load cancels the older one
    let loads = LifetimeSlot::new(&lifetime);
    Effect::new(move |_| {
        let id = article_id();
        let lifetime = loads.renew();
        article.set(None);
        let Some(id) = id else {
            error.set(Some(INVALID_ID.to_string()));
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

    let is_author = move || {
        let user = auth.user();
        article.with(|a| {
            a.as_ref()
                .is_some_and(|a| articles::is_author(user.as_ref(), a))
        })
    };

    Effect::new(move |_| {
        if deleted.get() {
            navigate("/", Default::default());
        }
    });

    let on_confirm_delete = Callback::new(move |_| {
        let Some(id) = article.with_untracked(|a| a.as_ref().map(|a| a.id)) else {
            return;
        };
        deleting.set(true);
        let client = auth.client();
        let lifetime = lifetime.clone();
        spawn_local(async move {
            let Some(result) = lifetime.run(client.delete_article(id)).await else {
                return;
            };
            deleting.set(false);
            confirm_open.set(false);
            match result {
                Ok(()) => deleted.set(true),
                Err(e) if e.is_session_expired() => {}
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    });

    view! {
        <section class="max-w-3xl mx-auto space-y-6">
            <A href="/" attr:class="inline-flex items-center gap-1 text-sm text-theme-secondary hover:text-theme-primary">
                <Icon name=icons::ARROW_LEFT class="h-4 w-4" />
                "Back to articles"
            </A>

            <ErrorMessage error=error />

            <Show when=move || loading.get()>
                <LoadingSpinner message="Loading article...".to_string() />
            </Show>

            {move || article.get().map(|a| {
                let edit_href = format!("/edit-article/{}", a.id);
                let published = format_timestamp(&a.created_at);
                let updated = a.was_edited().then(|| format_timestamp(&a.updated_at));
                let alt = a.title.clone();
                view! {
                    <article class="space-y-6">
                        <header class="space-y-3">
                            <h1 class="text-4xl font-bold text-theme-primary">{a.title.clone()}</h1>
                            <div class="flex flex-wrap items-center gap-3 text-sm text-theme-tertiary">
                                <Avatar name=a.author.name.clone() size=32 />
                                <span class="font-medium text-theme-primary">{a.author.name.clone()}</span>
                                <span class="flex items-center gap-1">
                                    <Icon name=icons::CALENDAR class="h-4 w-4" />
                                    {published}
                                </span>
                                {updated.map(|u| view! { <span>"Updated on " {u}</span> })}
                            </div>
                        </header>

                        {a.image.clone().map(|src| view! {
                            <img src=src alt=alt class="w-full rounded-xl object-cover max-h-[28rem]" />
                        })}

                        <div class="prose text-theme-primary whitespace-pre-line">{a.content.clone()}</div>

                        <Show when=is_author>
                            <div class="flex items-center gap-2 divider-top pt-4">
                                <A href=edit_href.clone() attr:class="btn-secondary flex items-center gap-1">
                                    <Icon name=icons::EDIT class="h-4 w-4" />
                                    "Edit"
                                </A>
                                <button
                                    class="btn-danger flex items-center gap-1"
                                    on:click=move |_| confirm_open.set(true)
                                >
                                    <Icon name=icons::TRASH class="h-4 w-4" />
                                    "Delete"
                                </button>
                            </div>
                        </Show>
                    </article>
                }
            })}

            <ConfirmDialog
                title="Delete article".to_string()
                message="This article will be removed permanently. Continue?".to_string()
                is_open=Signal::from(confirm_open)
                on_confirm=on_confirm_delete
                on_cancel=Callback::new(move |_| confirm_open.set(false))
                confirm_text="Delete".to_string()
                is_destructive=true
                busy=deleting
            />
        </section>
    }
}
