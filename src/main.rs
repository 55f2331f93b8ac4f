#[tokio::main]
async fn main() {
    admissions::boot::boot().await;
}
