use maud::Markup;
use maud::{html, PreEscaped};
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Kind {
    #[serde(rename = "line")]
    Line,
    #[serde(rename = "bar")]
    Bar,
    #[serde(rename = "scatter")]
    Scatter,
    /// Rendered by the chartjs-chart-boxplot plugin.
    #[serde(rename = "boxplot")]
    Box,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Grey,
    Custom(u8, u8, u8, f32),
}

impl Color {
    fn components(&self) -> (u8, u8, u8, f32) {
        match self {
            Color::Custom(r, g, b, a) => (*r, *g, *b, *a),
            Color::Red => (255, 99, 132, 0.8),
            Color::Orange => (255, 159, 64, 0.8),
            Color::Yellow => (255, 205, 86, 0.8),
            Color::Green => (75, 192, 192, 0.8),
            Color::Blue => (54, 162, 235, 0.8),
            Color::Purple => (153, 102, 255, 0.8),
            Color::Grey => (201, 203, 207, 0.8),
        }
    }

    pub fn rainbow() -> Vec<Color> {
        vec![
            Color::Custom(0x63, 0x04, 0x64, 0.8),
            Color::Custom(0x33, 0x1F, 0x7A, 0.8),
            Color::Custom(0x33, 0x59, 0xAA, 0.8),
            Color::Custom(0x42, 0x8A, 0xAA, 0.8),
            Color::Custom(0x5F, 0xA8, 0x70, 0.8),
            Color::Custom(0x89, 0xB3, 0x4A, 0.8),
            Color::Custom(0xB7, 0xAF, 0x35, 0.8),
            Color::Custom(0xD8, 0x91, 0x2C, 0.8),
            Color::Custom(0xD9, 0x53, 0x22, 0.8),
            Color::Custom(0xC1, 0x06, 0x18, 0.8),
            Color::Custom(0xDF, 0xDF, 0xDF, 0.8), //final gray
        ]
    }

    /// Diverging red-yellow-blue scale, centered on zero.
    ///
    /// `value` is clamped to `[-extent, extent]`; negative goes toward
    /// red, positive toward blue.
    pub fn diverging(value: f64, extent: f64) -> Color {
        let t = if extent > 0.0 {
            (value / extent).clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let mid = (255u8, 224u8, 144u8);
        let (end, weight) = if t < 0.0 {
            ((215u8, 48u8, 39u8), -t)
        } else {
            ((69u8, 117u8, 180u8), t)
        };
        let blend = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * weight).round() as u8;
        Color::Custom(
            blend(mid.0, end.0),
            blend(mid.1, end.1),
            blend(mid.2, end.2),
            0.8,
        )
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (r, g, b, a) = self.components();
        write!(f, "rgb({},{},{},{})", r, g, b, a)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// One value of a data series: a plain number, a scatter point or a
/// box summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Num(f64),
    Point {
        x: f64,
        y: f64,
    },
    Box {
        min: f64,
        q1: f64,
        median: f64,
        q3: f64,
        max: f64,
    },
    Null,
}

impl Value {
    pub fn xy(x: f64, y: f64) -> Value {
        Value::Point { x, y }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Value {
        Value::Num(value)
    }
}

/// A JavaScript snippet carried through the JSON config.
///
/// Serialized between `#` markers which [`Chart::to_json_dict`] strips
/// together with the surrounding quotes, so the browser sees a function
/// literal instead of a string. The snippet must not contain `#`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsCallback(String);

impl JsCallback {
    pub fn new(js: &str) -> JsCallback {
        JsCallback(js.to_string())
    }
}

impl Serialize for JsCallback {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("#{}#", self.0))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    #[serde(skip)]
    id: String,
    #[serde(rename = "type")]
    kind: Kind,
    data: ChartData,
    options: Options,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Options {
    plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    on_click: Option<JsCallback>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Plugins {
    title: Title,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Title {
    display: bool,
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartData {
    labels: Vec<String>,
    datasets: Vec<Dataset>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Value>,
    pub background_color: Vec<Color>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub border_color: Vec<Color>,
    pub fill: bool,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<[u8; 2]>,
    /// Overrides the chart kind for this series, e.g. a dashed line
    /// over a bar chart.
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    pub kind: Option<Kind>,
}

impl Chart {
    pub fn new(title: String, kind: Kind, labels: Vec<String>) -> Chart {
        Chart {
            id: format!(
                "_{}",
                thread_rng()
                    .sample_iter(&Alphanumeric)
                    .take(10)
                    .map(char::from)
                    .collect::<String>()
            ),
            kind,
            data: ChartData {
                labels,
                datasets: vec![],
            },
            options: Options {
                plugins: Plugins {
                    title: Title {
                        display: true,
                        text: title,
                    },
                },
                on_click: None,
            },
        }
    }

    pub fn add_dataset(&mut self, dataset: Dataset) {
        self.data.datasets.push(dataset)
    }

    pub fn set_on_click(&mut self, js: &str) {
        self.options.on_click = Some(JsCallback::new(js));
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.data.datasets
    }

    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    pub fn to_json_dict(&self) -> String {
        let s = serde_json::to_string(&self).unwrap();
        let re = Regex::new("\"#([^#]+)#\"").unwrap();
        let result = re.replace_all(&s, "$1");
        result.to_string()
    }

    pub fn to_html(&self) -> Markup {
        let script = format!(
            "var {} = new Chart(document.getElementById('{}'), {});",
            self.id,
            self.id,
            self.to_json_dict(),
        );

        html! {
            div {
                canvas id=(self.id) {
                }
            }
            script {
                (PreEscaped(script))
            }
        }
    }
}
