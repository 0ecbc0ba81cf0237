use {
    crate::utils::errorfmt::ErrorFmt,
    std::{
        error::Error,
        fmt::{Debug, Display, Formatter},
    },
};

pub type TestResult<T = ()> = Result<T, TestError>;

/// An error with an optional chain of context messages.
pub struct TestError {
    msg: String,
    source: Option<Box<dyn Error + 'static>>,
}

impl TestError {
    pub fn new<D: Display>(d: D) -> Self {
        Self {
            msg: d.to_string(),
            source: None,
        }
    }
}

impl Debug for TestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for TestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)?;
        if let Some(source) = &self.source {
            write!(f, ": {}", ErrorFmt(&**source))?;
        }
        Ok(())
    }
}

impl<E: Error + 'static> From<E> for TestError {
    fn from(error: E) -> Self {
        Self {
            msg: ErrorFmt(&error).to_string(),
            source: None,
        }
    }
}

impl TestError {
    fn into_std(self) -> StdTestError {
        StdTestError(self.to_string())
    }

    pub fn context<D: Display>(self, d: D) -> Self {
        Self {
            msg: d.to_string(),
            source: Some(Box::new(self.into_std())),
        }
    }
}

#[derive(Debug)]
struct StdTestError(String);

impl Display for StdTestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for StdTestError {}

pub trait TestErrorExt<T> {
    fn with_context<D, F>(self, f: F) -> TestResult<T>
    where
        D: Display,
        F: FnOnce() -> D;
}

impl<T, E> TestErrorExt<T> for Result<T, E>
where
    E: Into<TestError>,
{
    fn with_context<D, F>(self, f: F) -> TestResult<T>
    where
        D: Display,
        F: FnOnce() -> D,
    {
        self.map_err(|e| e.into().context(f()))
    }
}

macro_rules! bail {
    ($($tt:tt)*) => {{
        let msg = format!($($tt)*);
        return Err(crate::it::test_error::TestError::new(msg));
    }}
}
