use {
    log::{LevelFilter, Log, Metadata, Record},
    std::{
        cell::RefCell,
        io::Write,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering::Relaxed},
        },
        time::SystemTime,
    },
    thiserror::Error,
    uapi::{Errno, Fd, OwnedFd},
};

thread_local! {
    static BUFFER: RefCell<Vec<u8>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Could not dup stderr")]
    DupStderr(#[source] std::io::Error),
    #[error("A logger has already been installed")]
    AlreadyInstalled,
}

pub struct Logger {
    level: AtomicUsize,
    file: OwnedFd,
}

impl Logger {
    pub fn install_stderr(level: LevelFilter) -> Result<Arc<Self>, LoggerError> {
        let file = match uapi::fcntl_dupfd_cloexec(2, 0) {
            Ok(fd) => fd,
            Err(Errno(e)) => {
                return Err(LoggerError::DupStderr(std::io::Error::from_raw_os_error(e)));
            }
        };
        let slf = Arc::new(Self {
            level: AtomicUsize::new(level as usize),
            file,
        });
        log::set_boxed_logger(Box::new(LogWrapper {
            logger: slf.clone(),
        }))
        .map_err(|_| LoggerError::AlreadyInstalled)?;
        log::set_max_level(level);
        Ok(slf)
    }

    pub fn set_level(&self, level: LevelFilter) {
        self.level.store(level as usize, Relaxed);
        log::set_max_level(level);
    }
}

struct LogWrapper {
    logger: Arc<Logger>,
}

impl Log for LogWrapper {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() as usize <= self.logger.level.load(Relaxed)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        BUFFER.with_borrow_mut(|buffer| {
            buffer.clear();
            let now = humantime::format_rfc3339_millis(SystemTime::now());
            let _ = match record.module_path() {
                Some(mp) => writeln!(
                    buffer,
                    "[{} {:5} {}] {}",
                    now,
                    record.level(),
                    mp,
                    record.args(),
                ),
                None => writeln!(buffer, "[{} {:5}] {}", now, record.level(), record.args()),
            };
            let mut fd = Fd::new(self.logger.file.raw());
            let _ = fd.write_all(buffer);
        });
    }

    fn flush(&self) {
        // nothing
    }
}
