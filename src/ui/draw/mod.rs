//! UI drawing module
//!
//! Organized into focused submodules:
//! - `components`: header, footer, search bar, loading and empty states
//! - `modals`: credential, config and token dialogs
//! - `panels`: the three main columns (endpoints, docs, playground)
//! - `tabs`: playground tabs (request, response, headers)
//! - `styling`: color helpers

mod components;
mod modals;
mod panels;
mod styling;
mod tabs;

pub use components::{render_footer, render_header, render_search_bar};
pub use modals::{
    render_auth_modal, render_clear_confirmation_modal, render_config_modal, render_token_modal,
};
pub use panels::{render_docs_panel, render_endpoints_panel, render_playground_panel};
pub use tabs::{render_payload, try_format_json};
