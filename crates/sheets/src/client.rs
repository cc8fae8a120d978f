// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Blocking Sheets v4 client.
//!
//! `SheetsClient` owns the HTTP connection pool and the memoized bearer
//! token. `Spreadsheet` is an opened document and `Worksheet` one of its
//! tabs; `Worksheet` implements [`Table`].

use crate::a1;
use crate::auth::{ServiceAccount, ServiceAccountSource, TokenSource};
use crate::cache::TtlCell;
use crate::error::{Result, SheetsError};
use crate::models::{ApiErrorEnvelope, BatchUpdateRequest, SheetProperties, SpreadsheetMetadata, ValueRange};
use crate::table::Table;
use diagnostics::*;
use reqwest::blocking::RequestBuilder;
use std::rc::Rc;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// How long a token is reused before the handshake is repeated
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

const TIMEOUT_SECONDS: u64 = 60;

/// Tokens are refreshed this long before the issuer's expiry
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

pub struct SheetsClient {
    http: reqwest::blocking::Client,
    api_base: Url,
    source: Box<dyn TokenSource>,
    token: TtlCell<String>,
}

impl SheetsClient {
    pub fn new(source: Box<dyn TokenSource>, token_ttl: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECONDS))
            .build()?;

        Ok(Self {
            http,
            api_base: Url::parse(DEFAULT_API_BASE)?,
            source,
            token: TtlCell::new(token_ttl),
        })
    }

    pub fn from_service_account(account: ServiceAccount, token_ttl: Duration) -> Result<Self> {
        Self::new(Box::new(ServiceAccountSource::new(account)), token_ttl)
    }

    /// Point the client at a different API root (a proxy or a test server)
    pub fn with_api_base(mut self, base: &str) -> Result<Self> {
        let url = Url::parse(base.trim_end_matches('/'))?;
        if url.cannot_be_a_base() {
            return Err(SheetsError::InvalidLocator(format!(
                "{base} cannot be used as an API root"
            )));
        }
        self.api_base = url;
        Ok(self)
    }

    /// Current bearer token, performing the handshake if none is held or
    /// the held one has expired
    pub fn bearer(&self) -> Result<String> {
        self.token.get_or_try_init(|| {
            let source = self.source.describe();
            info!("Authenticating with {source}", source);
            let token = self.source.fetch_token(&self.http)?;
            let lifetime = token
                .expires_in
                .map(|d| d.saturating_sub(EXPIRY_MARGIN));
            Ok((token.secret, lifetime))
        })
    }

    /// Forget the held token; the next request authenticates again
    pub fn invalidate_token(&self) {
        debug!("Invalidating cached access token");
        self.token.invalidate();
    }

    pub fn token_is_fresh(&self) -> bool {
        self.token.is_fresh()
    }

    /// Open a spreadsheet by key and read its worksheet list
    pub fn open_by_key(client: &Rc<SheetsClient>, key: &str) -> Result<Spreadsheet> {
        let mut url = client.endpoint(&["spreadsheets", key])?;
        let _ = url
            .query_pairs_mut()
            .append_pair("fields", "properties.title,sheets.properties");

        let metadata: SpreadsheetMetadata = match client.fetch_json(client.http.get(url)) {
            Ok(metadata) => metadata,
            Err(SheetsError::Api { status: 404, .. }) => {
                return Err(SheetsError::SpreadsheetNotFound(key.to_string()));
            }
            Err(e) => return Err(e),
        };

        let mut sheets: Vec<SheetProperties> =
            metadata.sheets.into_iter().map(|s| s.properties).collect();
        sheets.sort_by_key(|s| s.index);

        let title = metadata.properties.title;
        let count = sheets.len();
        debug!("Opened spreadsheet {title} with {count} worksheets", title, count);

        Ok(Spreadsheet {
            client: Rc::clone(client),
            id: key.to_string(),
            title,
            sheets,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                SheetsError::InvalidLocator(format!("{} cannot be a base URL", self.api_base))
            })?;
            let _ = path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Send an authorized request and return the response body
    fn send(&self, request: RequestBuilder) -> Result<String> {
        let token = self.bearer()?;
        let response = request.bearer_auth(token).send()?;

        let status = response.status();
        let body = response.text()?;
        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.trim().to_string());
        let code = status.as_u16();
        warn!("Request failed with HTTP {code}: {message}", code, message);

        Err(match code {
            401 => SheetsError::Unauthorized {
                status: code,
                message,
            },
            _ => SheetsError::Api {
                status: code,
                message,
            },
        })
    }

    fn fetch_json<T>(&self, request: RequestBuilder) -> Result<T>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let body = self.send(request)?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// An opened spreadsheet document
pub struct Spreadsheet {
    client: Rc<SheetsClient>,
    id: String,
    title: String,
    sheets: Vec<SheetProperties>,
}

impl Spreadsheet {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Titles of all worksheets, in tab order
    pub fn worksheets(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.title.clone()).collect()
    }

    /// Worksheet at tab position `index` (0 is the first tab)
    pub fn worksheet(&self, index: usize) -> Result<Worksheet> {
        self.sheets
            .get(index)
            .map(|props| self.make_worksheet(props))
            .ok_or_else(|| {
                SheetsError::worksheet_not_found(format!("#{index}"), self.worksheets())
            })
    }

    pub fn worksheet_by_title(&self, title: &str) -> Result<Worksheet> {
        self.sheets
            .iter()
            .find(|s| s.title == title)
            .map(|props| self.make_worksheet(props))
            .ok_or_else(|| SheetsError::worksheet_not_found(format!("'{title}'"), self.worksheets()))
    }

    fn make_worksheet(&self, props: &SheetProperties) -> Worksheet {
        Worksheet {
            client: Rc::clone(&self.client),
            spreadsheet_id: self.id.clone(),
            sheet_id: props.sheet_id,
            title: props.title.clone(),
        }
    }
}

/// One tab of a spreadsheet
pub struct Worksheet {
    client: Rc<SheetsClient>,
    spreadsheet_id: String,
    sheet_id: i64,
    title: String,
}

impl Worksheet {
    pub fn sheet_id(&self) -> i64 {
        self.sheet_id
    }

    pub fn client(&self) -> &Rc<SheetsClient> {
        &self.client
    }

    fn values_url(&self, range: &str, suffix: &str) -> Result<Url> {
        let segment = format!("{range}{suffix}");
        self.client
            .endpoint(&["spreadsheets", &self.spreadsheet_id, "values", &segment])
    }

    fn qualified(&self, range: &str) -> String {
        if range.contains('!') {
            range.to_string()
        } else {
            a1::qualify(&self.title, range)
        }
    }
}

impl Table for Worksheet {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn get_all_values(&self) -> Result<Vec<Vec<String>>> {
        let url = self.values_url(&a1::whole_sheet(&self.title), "")?;
        let range: ValueRange = self.client.fetch_json(self.client.http.get(url))?;
        Ok(range.into_text_rows())
    }

    fn append_row(&self, row: &[String]) -> Result<()> {
        let mut url = self.values_url(&a1::whole_sheet(&self.title), ":append")?;
        let _ = url
            .query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let body = ValueRange::single_row(None, row);
        let _ = self.client.send(self.client.http.post(url).json(&body))?;
        Ok(())
    }

    fn update_row(&self, range: &str, row: &[String]) -> Result<()> {
        let range = self.qualified(range);
        let mut url = self.values_url(&range, "")?;
        let _ = url
            .query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");

        let body = ValueRange::single_row(Some(range), row);
        let _ = self.client.send(self.client.http.put(url).json(&body))?;
        Ok(())
    }

    fn delete_row(&self, row_number: usize) -> Result<()> {
        let segment = format!("{}:batchUpdate", self.spreadsheet_id);
        let url = self.client.endpoint(&["spreadsheets", &segment])?;

        let body = BatchUpdateRequest::delete_row(self.sheet_id, row_number);
        let _ = self.client.send(self.client.http.post(url).json(&body))?;
        Ok(())
    }
}
