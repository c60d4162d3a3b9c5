//! Previous/next buttons around a window of page numbers.

use leptos::prelude::*;

use crate::util::pagination::{PageItem, has_next, has_previous, page_window};

/// Zero-based pager. Renders nothing for a single page.
#[component]
pub fn Pager(
    #[prop(into)] current: Signal<u32>,
    #[prop(into)] total: Signal<u32>,
    on_change: Callback<u32>,
) -> impl IntoView {
    let items = move || page_window(current.get(), total.get());

    view! {
        <Show when=move || !items().is_empty()>
            <nav class="pager">
                <button
                    class="pager__step"
                    disabled=move || !has_previous(current.get())
                    on:click=move |_| {
                        if has_previous(current.get()) {
                            on_change.run(current.get() - 1);
                        }
                    }
                >
                    "Previous"
                </button>
                {move || {
                    items()
                        .into_iter()
                        .map(|item| match item {
                            PageItem::Ellipsis => view! { <span class="pager__gap">"..."</span> }.into_any(),
                            PageItem::Page(page) => {
                                let active = page == current.get();
                                view! {
                                    <button
                                        class=if active { "pager__page pager__page--active" } else { "pager__page" }
                                        aria-current=active.then_some("page")
                                        on:click=move |_| on_change.run(page)
                                    >
                                        {page + 1}
                                    </button>
                                }
                                    .into_any()
                            }
                        })
                        .collect_view()
                }}
                <button
                    class="pager__step"
                    disabled=move || !has_next(current.get(), total.get())
                    on:click=move |_| {
                        if has_next(current.get(), total.get()) {
                            on_change.run(current.get() + 1);
                        }
                    }
                >
                    "Next"
                </button>
            </nav>
        </Show>
    }
}
