use opendal::Operator;

/// Fresh in-memory operator per test, so tests never share state.
pub fn setup_operator() -> anyhow::Result<Operator> {
    let uri = format!("memory:///{}/", uuid::Uuid::new_v4().simple());
    Ok(memoki_core::storage::operator_from_uri(&uri)?)
}
