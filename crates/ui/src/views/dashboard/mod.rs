mod actions;
mod components;
mod view;

#[cfg(test)]
mod action_smoke;

pub use view::DashboardView;
