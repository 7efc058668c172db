//! Terminal reporting of a run's outcome

use crate::{selector::Selection, Result};
use std::io::Write;

/// Exit status for a successful or cancelled run
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status for any failure
pub const EXIT_FAILURE: i32 = 1;

/// Write the outcome of a run and return the process exit status
///
/// Success prints exactly the image URL on `out`; failure prints one line with the error
/// kind on `err` and leaves `out` untouched.
pub fn report<O, E>(outcome: &Result<Selection>, out: &mut O, err: &mut E) -> i32
where
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    match outcome {
        Ok(selection) => match writeln!(out, "{}", selection.photo.img_src).and_then(|_| out.flush()) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                let _ = writeln!(err, "Error [Output]: failed to write to stdout: {}", e);
                EXIT_FAILURE
            }
        },
        Err(e) => {
            let _ = writeln!(err, "Error [{}]: {}", e.kind(), e);
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{photos::PhotoSet, query::Query, rover::Rover, Error};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn selection() -> Selection {
        let set = PhotoSet::from_json(r#"{"photos": [{"img_src": "https://img/pic.jpg"}]}"#).unwrap();
        let photo = set.choose(&mut StdRng::seed_from_u64(0)).unwrap().clone();
        Selection {
            rover: Rover::Spirit,
            query: Query::sol(12),
            photo,
            attempts: 1,
        }
    }

    #[test]
    fn test_success_prints_one_line() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = report(&Ok(selection()), &mut out, &mut err);

        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(String::from_utf8(out).unwrap(), "https://img/pic.jpg\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_failure_writes_only_stderr() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let outcome = Err(Error::Api("Invalid JSON response: expected value".into()));
        let code = report(&outcome, &mut out, &mut err);

        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "Error [ApiFailure]: Invalid JSON response: expected value\n"
        );
    }
}
