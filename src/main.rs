#[actix_web::main]
async fn main() -> std::io::Result<()> {
    feedghost_backend::start_server().await
}
