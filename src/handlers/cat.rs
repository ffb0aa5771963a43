// Cat handler

use anyhow::Result;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

pub fn handle_cat(file: Option<&Path>) -> Result<i32> {
    let mut stdout = io::stdout().lock();
    match file {
        None => {
            io::copy(&mut io::stdin().lock(), &mut stdout)?;
        }
        Some(path) => {
            let file = match File::open(path) {
                Ok(file) => file,
                Err(_) => {
                    eprintln!("ck: {}: No such file or directory", path.display());
                    return Ok(1);
                }
            };
            io::copy(&mut BufReader::new(file), &mut stdout)?;
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn cats_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("data.txt");
        fs::write(&path, b"hello\n").unwrap();
        assert_eq!(handle_cat(Some(&path)).unwrap(), 0);
    }

    #[test]
    fn missing_file_exits_nonzero() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nope.txt");
        assert_eq!(handle_cat(Some(&path)).unwrap(), 1);
    }
}
