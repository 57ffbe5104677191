use crate::components::console::{ConsoleComponent, ConsoleProps};
use yew::{html, Component, Context, Html};

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let props = ConsoleProps::from_session();
        html! {
            <div>
                <ConsoleComponent ..props />
            </div>
        }
    }
}
