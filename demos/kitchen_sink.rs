use anyhow::Error;
use cognos_mashup::{endpoints::SPREADSHEET_ML, ClientOptions, Session};
use structopt::StructOpt;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::from_args();

    log::debug!("Starting application with {:#?}", args.service_url);

    // The session's HTTP client remembers cookies, which is how CMS knows
    // later requests belong to the same logged in user
    let options = ClientOptions {
        max_redirects: args.max_redirects,
        ..Default::default()
    };
    let mut session = Session::with_options(
        &args.service_url,
        &args.namespace,
        &args.username,
        &args.password,
        &options,
    )?;

    let logon = session.logon().await?;
    if !logon.is_authenticated() {
        // CMS says "200 OK" even when it rejects the credentials
        anyhow::bail!("Logon was rejected: {}", logon.raw.body);
    }
    log::info!("Logged on as {:#?}", logon.account);

    if let Some(folder) = &args.folder {
        let reports = session.get_reports(folder).await?;
        log::info!("Reports in {}:\n{}", folder, reports.body);
    }

    if let Some(report_id) = &args.report_id {
        let query: Vec<(&str, &str)> = args
            .params
            .iter()
            .filter_map(|param| {
                let mut split = param.splitn(2, '=');
                Some((split.next()?, split.next()?))
            })
            .collect();

        let prompts = session
            .get_prompt_description_by_id(report_id, &query)
            .await?;
        log::debug!("Prompts: {}", prompts.body);

        let report = session.get_report_by_id(report_id, &query).await?;
        log::info!("{}", report.body);

        let csv = session.get_export_by_id(report_id, &query, "CSV").await?;
        for row in csv.body.lines() {
            log::info!("{:?}", row.split('\t').collect::<Vec<_>>());
        }

        let spreadsheet = session
            .get_export_by_id(report_id, &query, SPREADSHEET_ML)
            .await?;
        log::info!(
            "The spreadsheet is {} base64 characters long",
            spreadsheet.body.len()
        );
    }

    log::info!("Logging off");
    let logoff = session.logoff().await?;
    log::debug!("{}", logoff.body);

    Ok(())
}

#[derive(Debug, StructOpt)]
struct Args {
    #[structopt(
        long = "service-url",
        help = "The CMS service URL, e.g. http://host/ibmcognos/cgi-bin/cognos.cgi"
    )]
    service_url: String,
    #[structopt(short = "n", long = "namespace", help = "The CAM namespace")]
    namespace: String,
    #[structopt(short = "u", long = "username", help = "Your username")]
    username: String,
    #[structopt(short = "p", long = "password", help = "Your password")]
    password: String,
    #[structopt(long = "folder", help = "A folder to list reports from")]
    folder: Option<String>,
    #[structopt(long = "report", help = "The source ID of a report to run")]
    report_id: Option<String>,
    #[structopt(
        long = "param",
        help = "A key=value query parameter passed to the report"
    )]
    params: Vec<String>,
    #[structopt(long = "max-redirects", default_value = "10")]
    max_redirects: usize,
}
