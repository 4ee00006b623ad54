use strum::Display;

/// Enum for the Tixly endpoints the bridge uses
#[derive(Display, Copy, Clone, Debug)]
pub enum Endpoint {
    #[strum(serialize = "/auth/token")]
    AuthToken,
    #[strum(serialize = "/order/get")]
    OrderGet,
}
