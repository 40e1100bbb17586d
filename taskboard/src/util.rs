/// Log the message as an error and terminate the process.
#[macro_export]
macro_rules! error_exit {
    ($($arg:tt)+) => ({
        log::error!($($arg)+);
        std::process::exit(1)
    });
}

pub trait StrExt: AsRef<str> {
    fn nonblank_to_some(&self) -> Option<String> {
        Some(self.as_ref().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    }
}

impl<T: AsRef<str>> StrExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonblank_is_trimmed() {
        assert_eq!("  board ".nonblank_to_some(), Some("board".to_owned()));
        assert_eq!(" \t\n".nonblank_to_some(), None);
        assert_eq!("".nonblank_to_some(), None);
    }
}
