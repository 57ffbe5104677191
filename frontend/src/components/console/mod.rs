//! ODS console: root module wiring the Yew `Component` implementation with
//! submodules for state, update logic, view rendering, and HTTP helpers.
//!
//! Responsibilities
//! - Re-export selected types (`Msg`, `ConsoleProps`, `ConsoleComponent`).
//! - Provide the `Component` implementation that delegates to `update::update`
//!   and `view::view`.
//! - On first render, load the site list and the audit log once; everything
//!   else is driven by messages.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::ConsoleProps;
pub use state::ConsoleComponent;

impl Component for ConsoleComponent {
    type Message = Msg;
    type Properties = ConsoleProps;

    fn create(_ctx: &Context<Self>) -> Self {
        ConsoleComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            update::load_sites(ctx);
            update::load_logs(ctx);
        }
    }
}
