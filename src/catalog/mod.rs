pub mod load;
pub mod project;
pub mod spec;

pub use load::{load_catalog_background, CatalogSource};
pub use project::{filter_categories, project_catalog, Category};
pub use spec::CatalogSpec;
