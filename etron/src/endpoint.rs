use strum::Display;

#[derive(Display, Copy, Clone, Debug)]
pub enum Endpoint {
    #[strum(serialize = "/api/v2/write/product.template/")]
    WriteProductTemplate,
}
