use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};

/// Runs `cmd` to completion with stdout and stderr sharing one pipe, so the
/// returned bytes keep the order the child wrote them in.
pub fn combined_output(mut cmd: Command) -> io::Result<(Vec<u8>, ExitStatus)> {
    let (mut reader, writer) = io::pipe()?;

    cmd.stdin(Stdio::null())
        .stdout(writer.try_clone()?)
        .stderr(writer);

    let mut child = cmd.spawn()?;

    // The command still holds both write ends; EOF never arrives until it's gone.
    drop(cmd);

    let mut output = Vec::new();
    let read = reader.read_to_end(&mut output);
    let status = child.wait()?;
    read?;

    Ok((output, status))
}
