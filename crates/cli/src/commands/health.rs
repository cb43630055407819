use blobsweep_store::ObjectStore;

pub async fn run(store: &dyn ObjectStore) -> anyhow::Result<()> {
    store.health_check().await?;
    println!("{}: ok", store.name());
    Ok(())
}
