//! Comparison driver.
//!
//! Dispatches file-vs-file, file-vs-dir, and dir-vs-dir comparisons, walks
//! directory pairs with a lexicographic name merge, and runs one pairwise
//! comparison end to end: read, canonicalize, diff, slide, format.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::SystemTime;

use bstr::{BString, ByteSlice};

use crate::format::{self, SideInfo};
use crate::lines::split_lines;
use crate::{algorithm, canon, slider, DiffError, DiffOptions, OutputFormat, PROGRAM};

/// Compare two paths, writing any differences to `out`.
///
/// Returns whether differences were found. `-` names standard input and is
/// incompatible with a directory on the other side; `-` against `-` is
/// trivially identical.
pub fn run<W: Write>(
    a: &Path,
    b: &Path,
    opts: &DiffOptions,
    out: &mut W,
) -> Result<bool, DiffError> {
    let a_stdin = is_stdin(a);
    let b_stdin = is_stdin(b);
    if a_stdin && b_stdin {
        return Ok(false);
    }
    let a_dir = !a_stdin && stat(a)?.is_dir();
    let b_dir = !b_stdin && stat(b)?.is_dir();
    match (a_dir, b_dir) {
        (true, true) => compare_dirs(a, b, opts, out),
        (true, false) => {
            if b_stdin {
                return Err(DiffError::StdinDirectory);
            }
            compare_files(&a.join(base_name(b)), b, opts, out, false)
        }
        (false, true) => {
            if a_stdin {
                return Err(DiffError::StdinDirectory);
            }
            compare_files(a, &b.join(base_name(a)), opts, out, false)
        }
        (false, false) => compare_files(a, b, opts, out, false),
    }
}

/// Compare two regular files (or standard input). `in_walk` prepends the
/// command-reconstruction header used during directory walks.
fn compare_files<W: Write>(
    a: &Path,
    b: &Path,
    opts: &DiffOptions,
    out: &mut W,
    in_walk: bool,
) -> Result<bool, DiffError> {
    let a_data = read_source(a)?;
    let b_data = read_source(b)?;
    let a_orig = split_lines(&a_data);
    let b_orig = split_lines(&b_data);

    let a_cmp = canon::canonicalize(&a_orig, opts);
    let b_cmp = canon::canonicalize(&b_orig, opts);
    let a_refs: Vec<&[u8]> = a_cmp.iter().map(|line| line.as_ref()).collect();
    let b_refs: Vec<&[u8]> = b_cmp.iter().map(|line| line.as_ref()).collect();

    let raw = algorithm::diff(&a_refs, &b_refs, opts.algorithm);
    let script = slider::slide(&raw, &a_refs, &b_refs);
    if script.is_empty() {
        return Ok(false);
    }

    if in_walk {
        writeln!(out, "{}", reconstruct_command(opts, a, b))?;
    }
    let a_info = side_info(a)?;
    let b_info = side_info(b)?;
    format::emit(
        out,
        opts.format,
        &script,
        &a_orig,
        &b_orig,
        &a_info,
        &b_info,
        opts.utc,
    )?;
    Ok(true)
}

/// Walk two directories in merged lexicographic order.
fn compare_dirs<W: Write>(
    a: &Path,
    b: &Path,
    opts: &DiffOptions,
    out: &mut W,
) -> Result<bool, DiffError> {
    let a_names = read_dir_sorted(a)?;
    let b_names = read_dir_sorted(b)?;
    let mut found = false;

    let mut i = 0;
    let mut j = 0;
    while i < a_names.len() || j < b_names.len() {
        let advance_a = match (a_names.get(i), b_names.get(j)) {
            (Some(x), Some(y)) => {
                if x == y {
                    found |= compare_entry(a, b, x, opts, out)?;
                    i += 1;
                    j += 1;
                    continue;
                }
                x < y
            }
            (Some(_), None) => true,
            _ => false,
        };
        if advance_a {
            writeln!(out, "Only in {}: {}", a.display(), os_bytes(&a_names[i]).as_bstr())?;
            i += 1;
        } else {
            writeln!(out, "Only in {}: {}", b.display(), os_bytes(&b_names[j]).as_bstr())?;
            j += 1;
        }
        found = true;
    }
    Ok(found)
}

/// Handle one name common to both directories.
fn compare_entry<W: Write>(
    a: &Path,
    b: &Path,
    name: &OsStr,
    opts: &DiffOptions,
    out: &mut W,
) -> Result<bool, DiffError> {
    let a_path = a.join(name);
    let b_path = b.join(name);
    let a_dir = stat(&a_path)?.is_dir();
    let b_dir = stat(&b_path)?.is_dir();
    match (a_dir, b_dir) {
        (true, true) => {
            if opts.recursive {
                compare_dirs(&a_path, &b_path, opts, out)
            } else {
                writeln!(
                    out,
                    "Common subdirectories: {} and {}",
                    a_path.display(),
                    b_path.display()
                )?;
                Ok(false)
            }
        }
        (true, false) => {
            writeln!(
                out,
                "File {} is a directory while file {} is a regular file",
                a_path.display(),
                b_path.display()
            )?;
            Ok(true)
        }
        (false, true) => {
            writeln!(
                out,
                "File {} is a regular file while file {} is a directory",
                a_path.display(),
                b_path.display()
            )?;
            Ok(true)
        }
        (false, false) => compare_files(&a_path, &b_path, opts, out, true),
    }
}

/// Directory entry names in lexicographic order. The underlying
/// enumeration order is never trusted.
fn read_dir_sorted(dir: &Path) -> Result<Vec<OsString>, DiffError> {
    let entries = fs::read_dir(dir).map_err(|source| DiffError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DiffError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        names.push(entry.file_name());
    }
    names.sort();
    Ok(names)
}

/// Header line so the file comparison below it can be re-invoked.
fn reconstruct_command(opts: &DiffOptions, a: &Path, b: &Path) -> String {
    let mut parts = vec![PROGRAM.to_string()];
    if opts.ignore_space_change {
        parts.push("-b".to_string());
    }
    if opts.ignore_case {
        parts.push("-i".to_string());
    }
    if opts.recursive {
        parts.push("-r".to_string());
    }
    match opts.format {
        OutputFormat::Normal => {}
        OutputFormat::Ed => parts.push("-e".to_string()),
        OutputFormat::AltEd => parts.push("-f".to_string()),
        OutputFormat::Context(3) => parts.push("-c".to_string()),
        OutputFormat::Context(n) => parts.push(format!("-C {n}")),
        OutputFormat::Unified(3) => parts.push("-u".to_string()),
        OutputFormat::Unified(n) => parts.push(format!("-U {n}")),
    }
    match opts.algorithm {
        algorithm::Algorithm::Myers => {}
        algorithm::Algorithm::Patience => parts.push("--patience".to_string()),
        algorithm::Algorithm::Histogram => parts.push("--histogram".to_string()),
    }
    if opts.utc {
        parts.push("--utc".to_string());
    }
    parts.push(a.display().to_string());
    parts.push(b.display().to_string());
    parts.join(" ")
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn base_name(path: &Path) -> &OsStr {
    path.file_name().unwrap_or_else(|| path.as_os_str())
}

fn stat(path: &Path) -> Result<fs::Metadata, DiffError> {
    fs::metadata(path).map_err(|source| DiffError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read the full contents of a file, or of standard input for `-`.
fn read_source(path: &Path) -> Result<Vec<u8>, DiffError> {
    if is_stdin(path) {
        let mut data = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut data)
            .map_err(|source| DiffError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        return Ok(data);
    }
    fs::read(path).map_err(|source| DiffError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Label and mtime for a format header. Standard input shows `-` and the
/// current time.
fn side_info(path: &Path) -> Result<SideInfo, DiffError> {
    if is_stdin(path) {
        return Ok(SideInfo {
            label: "-".into(),
            mtime: SystemTime::now(),
        });
    }
    let mtime = stat(path)?.modified().map_err(|source| DiffError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SideInfo {
        label: os_bytes(path.as_os_str()),
        mtime,
    })
}

/// Raw bytes of an OS string, so non-UTF-8 names print unmangled.
fn os_bytes(os: &OsStr) -> BString {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        BString::from(os.as_bytes())
    }
    #[cfg(not(unix))]
    {
        BString::from(os.to_string_lossy().into_owned().into_bytes())
    }
}
