//! HTML pages for the report views.
//!
//! Three templates: the common statistic table, the driver directory and a
//! single driver statistic. Each renders either its data or an error flag.

use crate::types::{DriverMap, DriverStatistic};

/// Error flags a page can be rendered with instead of data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFlag {
    InvalidOrder,
    DataUnevalable,
    UnknownCode,
}

impl ErrorFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorFlag::InvalidOrder => "invalid_order",
            ErrorFlag::DataUnevalable => "data_unevalable",
            ErrorFlag::UnknownCode => "unknown_code",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ErrorFlag::InvalidOrder => "Unknown order. Use asc or desc.",
            ErrorFlag::DataUnevalable => "Report data is unavailable.",
            ErrorFlag::UnknownCode => "No driver with this code.",
        }
    }
}

/// Template input: data or an error flag, never both.
#[derive(Debug, Clone)]
pub enum Page<T> {
    Data(T),
    Error(ErrorFlag),
}

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(template: &str, title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n\
         <body data-template=\"{template}\">\n\
         <nav><a href=\"/report/\">Report</a> | <a href=\"/report/drivers/\">Drivers</a></nav>\n\
         <h1>{title}</h1>\n\
         {body}\
         </body>\n\
         </html>\n",
        title = escape(title),
    )
}

fn error_block(flag: ErrorFlag) -> String {
    format!(
        "<div class=\"error\" data-error=\"{}\">{}</div>\n",
        flag.as_str(),
        flag.message()
    )
}

/// `common_statistic.html`: report lines in the requested order.
pub fn common_statistic(page: &Page<Vec<String>>) -> String {
    let mut body = String::from(
        "<p class=\"order\"><a href=\"/report/?order=asc\">asc</a> | \
         <a href=\"/report/?order=desc\">desc</a></p>\n",
    );
    match page {
        Page::Data(lines) => {
            body.push_str("<div class=\"report\">\n");
            for line in lines {
                body.push_str(&format!("<pre class=\"line\">{}</pre>\n", escape(line)));
            }
            body.push_str("</div>\n");
        }
        Page::Error(flag) => body.push_str(&error_block(*flag)),
    }
    layout("common_statistic", "Monaco 2018 Racing Report", &body)
}

/// `drivers_and_codes.html`: every driver name linked to its statistic page.
pub fn drivers_and_codes(page: &Page<DriverMap<String>>) -> String {
    let body = match page {
        Page::Data(drivers) => {
            let mut body = String::from("<ul class=\"drivers\">\n");
            for (code, name) in drivers.iter() {
                body.push_str(&format!(
                    "<li><a href=\"/report/drivers/?driver_id={code}\">{name}</a> <code>{code}</code></li>\n",
                    code = escape(code),
                    name = escape(name),
                ));
            }
            body.push_str("</ul>\n");
            body
        }
        Page::Error(flag) => error_block(*flag),
    };
    layout("drivers_and_codes", "Drivers", &body)
}

/// `driver_statistic.html`: one driver's name and statistic line.
pub fn driver_statistic(page: &Page<DriverStatistic>) -> String {
    match page {
        Page::Data(stat) => {
            let body = format!(
                "<h2 class=\"name\">{}</h2>\n<pre class=\"statistic\">{}</pre>\n",
                escape(&stat.name),
                escape(&stat.driver_statistic),
            );
            layout("driver_statistic", &stat.name, &body)
        }
        Page::Error(flag) => layout("driver_statistic", "Driver", &error_block(*flag)),
    }
}
