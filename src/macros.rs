#[macro_export]
macro_rules! full_info {
    ($($arg:tt)*) => {
        log::info!("{}:{}: {}", file!(), line!(), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! full_warn {
    ($($arg:tt)*) => {
        log::warn!("{}:{}: {}", file!(), line!(), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! full_error {
    ($($arg:tt)*) => {
        log::error!("{}:{}: {}", file!(), line!(), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_return_err {
    ( $e:expr ) => {{
        log::error!("\t{}\n {:#?}", $e, $e);
        return Err($e);
    }};
}
