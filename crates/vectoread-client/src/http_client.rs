use reqwest::Client;

const DISABLE_SYSTEM_PROXY_ENV: &str = "VECTOREAD_DISABLE_SYSTEM_PROXY";

const USER_AGENT: &str = concat!("vectoread/", env!("CARGO_PKG_VERSION"));

pub(crate) fn build_http_client() -> Client {
    let builder = Client::builder().user_agent(USER_AGENT);
    let builder = if should_disable_system_proxy() {
        builder.no_proxy()
    } else {
        builder
    };
    builder.build().expect("Failed to build reqwest client")
}

fn should_disable_system_proxy() -> bool {
    if std::env::var_os(DISABLE_SYSTEM_PROXY_ENV).is_some() {
        return true;
    }

    cfg!(test)
}
