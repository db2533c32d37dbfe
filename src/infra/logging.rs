/// Подключить env_logger. Уровень по умолчанию `info`, переопределяется
/// через `RUST_LOG`. Повторный вызов ничего не делает.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {}
