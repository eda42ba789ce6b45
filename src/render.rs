use std::fmt::Write as _;

/// Cells in the context progress bar.
pub const BAR_WIDTH: usize = 40;

/// Visible width the left column pads to before the separator glyph.
pub const COLUMN_ONE_WIDTH: usize = 44;

const FILLED_CELL: &str = "\u{2588}";
const EMPTY_CELL: &str = "\u{2591}";

/// Named escape-sequence table handed to the composer. Alignment never
/// depends on these values; `visible_width` strips whatever they contain.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub reset: &'static str,
    pub bold: &'static str,
    pub cyan: &'static str,
    pub purple: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub red: &'static str,
    pub orange: &'static str,
    pub white: &'static str,
    pub blue: &'static str,
    pub separator: &'static str,
    pub dim: &'static str,
}

pub const DEFAULT_THEME: Theme = Theme {
    reset: "\x1b[0m",
    bold: "\x1b[1m",
    cyan: "\x1b[38;2;6;182;212m",
    purple: "\x1b[38;2;168;85;247m",
    green: "\x1b[38;2;34;197;94m",
    yellow: "\x1b[38;2;245;158;11m",
    red: "\x1b[38;2;239;68;68m",
    orange: "\x1b[38;2;251;146;60m",
    white: "\x1b[38;2;228;228;231m",
    blue: "\x1b[38;2;59;130;246m",
    separator: "\x1b[38;2;55;55;62m",
    dim: "\x1b[38;2;40;40;45m",
};

/// Display-ready fields for one statusline frame. Everything here is
/// already formatted text except the clamped context percentage.
#[derive(Debug, Clone)]
pub struct StatusFields {
    pub activity: String,
    pub model: String,
    pub git_ref: String,
    pub directory: String,
    pub tokens_in: String,
    pub tokens_out: String,
    pub tokens_total: String,
    pub cost: String,
    pub duration: String,
    pub context_pct: u8,
}

/// Counts the columns a terminal will actually render, skipping over
/// `ESC ... m` styling runs.
pub fn visible_width(text: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;
    for ch in text.chars() {
        if in_escape {
            if ch == 'm' {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }
    width
}

/// Right-pads to a visible width so embedded styling never skews columns.
fn pad_visible(text: &str, width: usize) -> String {
    let visible = visible_width(text);
    if visible >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - visible))
}

pub fn context_color(pct: u8, theme: &Theme) -> &'static str {
    if pct > 90 {
        theme.red
    } else if pct > 75 {
        theme.orange
    } else if pct > 40 {
        theme.yellow
    } else {
        theme.white
    }
}

pub fn context_bar(pct: u8, theme: &Theme) -> String {
    let filled = ((pct as usize * BAR_WIDTH) / 100).min(BAR_WIDTH);
    format!(
        "{}{}{r}{}{}{r}",
        context_color(pct, theme),
        FILLED_CELL.repeat(filled),
        theme.dim,
        EMPTY_CELL.repeat(BAR_WIDTH - filled),
        r = theme.reset,
    )
}

/// Arranges the fields into the fixed 4-row, 2-column block. Rows one to
/// three end in a newline; the final row is left unterminated so the host
/// prompt continues on the same line.
pub fn compose(fields: &StatusFields, theme: &Theme) -> String {
    let r = theme.reset;
    let b = theme.bold;
    let sep = format!("  {}\u{2502}{r}  ", theme.separator);
    let activity_color = if fields.activity == "Idle" {
        theme.dim
    } else {
        theme.green
    };
    let ctx_color = context_color(fields.context_pct, theme);

    let action = format!(
        "{c}Action:{r} {c}{}{r}",
        fields.activity,
        c = activity_color
    );
    let model = format!("{c}Model:{r} {c}{b}{}{r}", fields.model, c = theme.purple);
    let tokens = format!(
        "{y}Tokens:{r} {y}{} {w}in{r} {y}+ {} {w}out{r} {y}= {b}{}{r}",
        fields.tokens_in,
        fields.tokens_out,
        fields.tokens_total,
        y = theme.yellow,
        w = theme.white,
    );
    let session = format!("{c}Session:{r} {c}{}{r}", fields.duration, c = theme.blue);

    let mut out = String::with_capacity(1024);
    let _ = writeln!(
        out,
        " {}{sep}{w}Git:{r} {w}{}{r}",
        pad_visible(&action, COLUMN_ONE_WIDTH),
        fields.git_ref,
        w = theme.white,
    );
    let _ = writeln!(
        out,
        " {}{sep}{c}Dir:{r} {c}{}{r}",
        pad_visible(&model, COLUMN_ONE_WIDTH),
        fields.directory,
        c = theme.cyan,
    );
    let _ = writeln!(
        out,
        " {}{sep}{g}Cost:{r} {g}{}{r}",
        pad_visible(&tokens, COLUMN_ONE_WIDTH),
        fields.cost,
        g = theme.green,
    );
    let _ = write!(
        out,
        " {}{sep}{ctx}Context:{r} {} {ctx}{}%{r}",
        pad_visible(&session, COLUMN_ONE_WIDTH),
        context_bar(fields.context_pct, theme),
        fields.context_pct,
        ctx = ctx_color,
    );
    out
}
