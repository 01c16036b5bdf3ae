#[macro_export]
macro_rules! get_datepick_setting {
    ($setting:ident) => {
        ::std::env::var(stringify!($setting)).unwrap_or($crate::config::$setting.to_string())
    };
    ($setting:ident, usize) => {
        match ::std::env::var(stringify!($setting)) {
            Ok(v) => match v.trim().parse() {
                Ok(i) => i,
                Err(_e) => {
                    ::log::warn!(
                        "Env var setting {}, is not a valid unsigned integer. Using default",
                        stringify!($setting)
                    );
                    $crate::config::$setting
                }
            },
            Err(_e) => $crate::config::$setting,
        }
    };
    ($setting:ident, bool) => {
        match ::std::env::var(stringify!($setting))
            .unwrap_or($crate::config::$setting.to_string())
            .trim()
            .to_lowercase()
            .as_str()
        {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                ::log::warn!(
                    "Env var setting {}, is not a valid boolean. Using default",
                    stringify!($setting)
                );
                $crate::config::$setting == "true"
            }
        }
    };
}
