use linkboard::{
    startup,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() {
    let subscriber = get_subscriber("linkboard".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);
    startup::run().await
}
