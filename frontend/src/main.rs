use crate::app::App;

mod app;
mod components;
mod download;
mod notify;

fn main() {
    yew::Renderer::<App>::new().render();
}
