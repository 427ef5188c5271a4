use std::{fs, io};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};

pub(crate) fn file_to_vec(filename: &Path) -> io::Result<Vec<String>> {
    let file_in = fs::File::open(filename)?;
    let file_reader = BufReader::new(file_in);
    file_reader.lines().collect()
}

pub(crate) fn trace(is_test: bool, l_type: &str, l_step: &str, start: Instant, _elapsed: Duration) -> Duration {
    if is_test {
        println!("{} | Total={}ms | {}={:.2?}", l_type, start.elapsed().as_millis(), l_step, start.elapsed() - _elapsed);
    }
    else {
        log::trace!("{} | Total={:.2?} | {}={:.2?}", l_type, start.elapsed(), l_step, start.elapsed() - _elapsed);
    }
    start.elapsed()
}
