pub struct ServiceArgs {
    pub interval_minutes: Option<u64>,
}
