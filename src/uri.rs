/// Origin stored in seeded picture URIs, swapped for the configured base URL on output.
pub const CATALOG_BASE_URL_PLACEHOLDER: &str = "http://catalogbaseurltobereplaced";

#[derive(Debug, Clone)]
pub struct UriComposer {
    catalog_base_url: String,
}

impl UriComposer {
    pub fn new(catalog_base_url: impl Into<String>) -> Self {
        Self {
            catalog_base_url: catalog_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn compose_pic_uri(&self, uri_template: &str) -> String {
        uri_template.replace(CATALOG_BASE_URL_PLACEHOLDER, &self.catalog_base_url)
    }
}
