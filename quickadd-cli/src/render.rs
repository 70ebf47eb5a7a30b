//! Plain-text rendering of a resolved command, one field per line.

use quickadd_core::CommandInfo;

pub fn format_command_info(info: &CommandInfo) -> String {
    let command: &str = info.command.as_ref();
    let mut out = format!("command   {command}\n");
    if let Some(name) = &info.task_name {
        out.push_str(&format!("name      {name}\n"));
    }
    if let Some(new_name) = &info.edited_name {
        out.push_str(&format!("new name  {new_name}\n"));
    }
    if let Some(start) = info.start {
        out.push_str(&format!("start     {}\n", start.format("%Y-%m-%d %H:%M")));
    }
    if let Some(end) = info.end {
        out.push_str(&format!("end       {}\n", end.format("%Y-%m-%d %H:%M")));
    }
    if info.index > 0 {
        out.push_str(&format!("index     {}\n", info.index));
    }
    out
}
