/// Preamble pasted ahead of the aggregated files when starting a
/// conversation with an assistant.
pub const INTRO_TEXT: &str = "\
Hi! I have a project, mostly Python and built on Streamlit.
I am going to send you the project's files: each file's name followed by its full content.
Please wait until I have sent everything, then wait for my requests.
Once we agree on a change, tell me which file has to change and send it back complete, with the edit applied.
If more than one file changes, send them one after another.
If a new file is needed, give its name and send it in full.
If a new library or similar dependency is needed, point it out.
";
