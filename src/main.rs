#[tokio::main]
async fn main() {
    champions_leagues_lib::run().await;
}
