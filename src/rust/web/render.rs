//! HTML for the three pages. Every page shares the same shell: a sidebar with
//! the page selector and a static header with the logo, title and subheader.

use std::fmt::Write;

use super::pages::Page;
use super::state::AppState;

pub const TITLE: &str = "DataInsight News Classifier";
pub const SUBHEADER: &str = "Analyzing news articles";
/// Initial content of the text box on the Prediction page.
pub const TEXT_PLACEHOLDER: &str = "Type Here";

const LOGO: &str = "/assets/Datainsight_Logo.png";
const HOMEPAGE_IMAGE: &str = "/assets/Homepage.jpg";
const NEWS_VIDEO: &str = "/assets/Breaking%20News%20Video.mp4";

const STYLE: &str = "body{margin:0;font-family:sans-serif;display:flex;color:#262730}\
    nav{width:240px;min-height:100vh;background:#f0f2f6;padding:1.5rem;box-sizing:border-box}\
    main{flex:1;padding:2rem 4rem;max-width:60rem}\
    .info{background:#e8f0fe;color:#1c4f9c;padding:1rem;border-radius:.5rem}\
    .success{background:#e6f4ea;color:#176c32;padding:1rem;border-radius:.5rem}\
    .error{background:#fdecea;color:#8a1c1c;padding:1rem;border-radius:.5rem}\
    textarea{width:100%;min-height:10rem}img.full,video{width:100%}";

/// What happened when the user pressed "Classify".
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    /// Predicted label and per-category confidence, highest first
    Success {
        label: String,
        scores: Vec<(String, f32)>,
    },
    /// The input could not be classified; the message is shown to the user
    Invalid(String),
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(selected: Page, body: &str) -> String {
    let mut options = String::new();
    for page in Page::all() {
        let selected_attr = if page == selected { " selected" } else { "" };
        let _ = write!(options, "<option value=\"{0}\"{1}>{0}</option>", page.name(), selected_attr);
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n\
         <nav>\n<form method=\"get\" action=\"/\">\n\
         <label for=\"page\">Choose Option</label><br>\n\
         <select id=\"page\" name=\"page\" onchange=\"this.form.submit()\">{options}</select>\n\
         <noscript><button type=\"submit\">Go</button></noscript>\n\
         </form>\n</nav>\n<main>\n\
         <img src=\"{logo}\" alt=\"DataInsight logo\" width=\"200\">\n\
         <h1>{title}</h1>\n<h3>{subheader}</h3>\n{body}\n</main>\n</body>\n</html>\n",
        title = TITLE,
        style = STYLE,
        options = options,
        logo = LOGO,
        subheader = SUBHEADER,
        body = body,
    )
}

pub fn home_page() -> String {
    let body = format!(
        r#"<p class="info">Welcome to DataInsight Solutions!</p>
<p>This app allows you to classify news articles using machine learning models. You can navigate to the Prediction page to classify new articles or visit the Information page to learn more about the app.</p>
<figure>
<img class="full" src="{image}" alt="Homepage">
<figcaption>The power of predictive analysis is within your reach</figcaption>
</figure>
<h3>Enhancing News Classification</h3>
<p>In today's digital age, efficiently managing the vast amount of news content is a significant challenge for news outlets. Our team at DataInsight Solutions has been brought on board as data science consultants to develop a sophisticated news classification system. This project will use machine learning and natural language processing (NLP) to improve content categorization and enhance the reader experience.</p>
<p>Our purpose is to ensure accurate classification of news articles, optimizing content management for the outlet and providing a more personalized experience for readers.</p>
<p>The key stakeholders who will benefit from our solution are:</p>
<ul>
<li><strong>Editorial Team:</strong> Simplified workflows and better article organization.</li>
<li><strong>IT/Tech Support:</strong> Easy integration and deployment of advanced models.</li>
<li><strong>Management:</strong> Increased operational efficiency and valuable strategic insights.</li>
<li><strong>Readers:</strong> More personalized and engaging news content.</li>
</ul>
<p>DataInsight Solutions aims to showcase the practical application of data science in solving real-world problems. Our project will emphasize the importance of thorough data preprocessing, selecting appropriate models, and rigorous performance evaluation. Deploying our solution as a web application ensures accessibility and usability for non-technical stakeholders.</p>
<h3>In today's news...</h3>
<h3>Reporting live: Political Scandal Unveiled, High-level Corruption Exposed</h3>
<video controls src="{video}"></video>
<h3>Services We Offer:</h3>
<ul>
<li><strong>Data Strategy and Consulting</strong></li>
<li><strong>Machine Learning and Artificial Intelligence</strong></li>
<li><strong>Natural Language Processing (NLP)</strong></li>
<li><strong>Data Engineering</strong></li>
<li><strong>Data Visualization and Reporting</strong></li>
<li><strong>Cloud Solutions</strong></li>
<li><strong>Advanced Analytics</strong></li>
<li><strong>Training and Workshops</strong></li>
</ul>"#,
        image = HOMEPAGE_IMAGE,
        video = NEWS_VIDEO,
    );
    layout(Page::Home, &body)
}

pub fn information_page(state: &AppState) -> String {
    let mut body = String::from(
        r#"<p class="info">How the App Works</p>
<h3>How to Use the News Classifier App</h3>
<ol>
<li><strong>Navigate to the Prediction Page:</strong> Use the sidebar to select the "Prediction" option.</li>
<li><strong>Enter Your Text:</strong> In the text area provided, type or paste the news article you want to classify.</li>
<li><strong>Classify the Text:</strong> Click the "Classify" button. The app will use a pre-trained machine learning model to analyze and classify the text.</li>
<li><strong>View the Result:</strong> The classification result will be displayed on the screen, indicating the category of the news article.</li>
</ol>
<h3>Behind the Scenes</h3>
<ul>
<li><strong>Data Preprocessing:</strong> The text you input is preprocessed to remove any noise and convert it into a format suitable for the machine learning model.</li>
<li><strong>Vectorization:</strong> The cleaned text is transformed into numerical vectors using a technique called TF-IDF (Term Frequency-Inverse Document Frequency).</li>
<li><strong>Prediction:</strong> The vectorized text is fed into a machine learning model (e.g., Logistic Regression) to predict the category of the news article.</li>
<li><strong>Output:</strong> The predicted category is displayed to the user in a human-readable format.</li>
</ul>
"#,
    );

    let info = state.classifier.info();
    body.push_str("<h3>Available Models</h3>\n<ul>\n");
    for (name, kind) in &info.models {
        let default_marker = if *name == info.default_model { " (default)" } else { "" };
        let _ = writeln!(
            body,
            "<li><strong>{}</strong>: {}{}</li>",
            escape_html(name),
            kind,
            default_marker
        );
    }
    let _ = writeln!(
        body,
        "</ul>\n<p>Vocabulary size: {} terms.</p>",
        info.vocabulary_size
    );

    if let Some(dataset) = state.dataset.as_ref().filter(|d| !d.is_empty()) {
        let _ = writeln!(
            body,
            "<h3>Training Data</h3>\n<p>The models were trained on {} labelled articles:</p>\n<table>\n<tr><th>Category</th><th>Articles</th></tr>",
            dataset.len()
        );
        for (category, count) in dataset.category_counts() {
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape_html(&category),
                count
            );
        }
        body.push_str("</table>\n");
    }

    body.push_str(
        r#"<h3>Benefits of Using the App</h3>
<ul>
<li><strong>Quick and Accurate Classification:</strong> Our app leverages advanced machine learning algorithms to provide fast and accurate classification of news articles.</li>
<li><strong>User-Friendly Interface:</strong> The app is designed to be intuitive and easy to use, even for those without a technical background.</li>
<li><strong>Versatile Applications:</strong> Whether you're a journalist, researcher, or just someone interested in categorizing news, this app can be a valuable tool.</li>
</ul>
<h3>Contact Us</h3>
<p>For more information or support, please contact us at <a href="mailto:support@datainsight.com">support@datainsight.com</a>.</p>"#,
    );

    layout(Page::Information, &body)
}

/// The Prediction page, with the text box holding `text` and `selected_model`
/// preselected. `outcome` is shown below the form after a classification.
pub fn prediction_page(
    state: &AppState,
    text: &str,
    selected_model: &str,
    outcome: Option<&PredictionOutcome>,
) -> String {
    let mut model_options = String::new();
    for name in state.classifier.model_names() {
        let selected_attr = if name.eq_ignore_ascii_case(selected_model) {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            model_options,
            "<option value=\"{0}\"{1}>{0}</option>",
            escape_html(name),
            selected_attr
        );
    }

    let mut body = format!(
        "<p class=\"info\">Prediction with ML Models</p>\n\
         <form method=\"post\" action=\"/predict\">\n\
         <label for=\"text\">Enter Text</label><br>\n\
         <textarea id=\"text\" name=\"text\">\n{text}</textarea><br>\n\
         <label for=\"model\">Choose Model</label>\n\
         <select id=\"model\" name=\"model\">{options}</select>\n\
         <button type=\"submit\">Classify</button>\n\
         </form>\n",
        text = escape_html(text),
        options = model_options,
    );

    match outcome {
        Some(PredictionOutcome::Success { label, scores }) => {
            let _ = writeln!(
                body,
                "<p class=\"success\">Text Categorized as: {}</p>",
                escape_html(label)
            );
            body.push_str("<ul class=\"scores\">\n");
            for (category, score) in scores {
                let _ = writeln!(
                    body,
                    "<li>{}: {:.1}%</li>",
                    escape_html(category),
                    score * 100.0
                );
            }
            body.push_str("</ul>\n");
        }
        Some(PredictionOutcome::Invalid(message)) => {
            let _ = writeln!(body, "<p class=\"error\">{}</p>", escape_html(message));
        }
        None => {}
    }

    layout(Page::Prediction, &body)
}
