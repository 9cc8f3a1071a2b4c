use askama::Template;
use askama_web::WebTemplate;

pub struct EndpointSummary {
    pub path: &'static str,
    pub params: &'static str,
    pub description: &'static str,
}

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub endpoints: Vec<EndpointSummary>,
    pub countries_base_url: String,
}
