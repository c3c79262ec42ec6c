use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use flight_planner::data::{load_alliances, load_flights};
use flight_planner::domain::{Interner, TimeError, TimeWindow, Timestamp};
use flight_planner::planner::{Planner, SearchConfig, SessionContext, TripRequest};
use flight_planner::report::{PlanResult, TextReport};
use flight_planner::spill::{self, SpillReader};

fn parse_time(s: &str) -> Result<Timestamp, TimeError> {
    Timestamp::parse_compact(s)
}

/// Find the cheapest trip to a conference and back, with and without a
/// vacation on the way.
///
/// Times use the `MMDDYYYYhhmmss` format, durations are in seconds.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Home city
    #[arg(long)]
    from: String,

    /// Conference city
    #[arg(long)]
    to: String,

    /// Earliest take-off towards the conference
    #[arg(long, value_parser = parse_time)]
    departure_time_min: Timestamp,

    /// Latest landing at the conference
    #[arg(long, value_parser = parse_time)]
    departure_time_max: Timestamp,

    /// Earliest take-off back home
    #[arg(long, value_parser = parse_time)]
    arrival_time_min: Timestamp,

    /// Latest landing back home
    #[arg(long, value_parser = parse_time)]
    arrival_time_max: Timestamp,

    /// Longest wait between two connecting flights
    #[arg(long, default_value_t = 12 * 60 * 60)]
    max_layover: i64,

    /// Shortest vacation
    #[arg(long, default_value_t = 0)]
    vacation_time_min: i64,

    /// Longest vacation
    #[arg(long, default_value_t = 0)]
    vacation_time_max: i64,

    /// Candidate vacation cities
    #[arg(long, num_args = 0.., value_delimiter = ',')]
    vacation_airports: Vec<String>,

    /// Flight file (`id;from;take_off;to;land;cost;company` per line)
    #[arg(long)]
    flights: PathBuf,

    /// Alliance file (`;`-separated companies per line)
    #[arg(long)]
    alliances: PathBuf,

    /// Where to write the round-trip proposal
    #[arg(long, default_value = "work_hard.txt")]
    work_hard_file: PathBuf,

    /// Where to write the vacation proposals
    #[arg(long, default_value = "play_hard.txt")]
    play_hard_file: PathBuf,

    /// Also write every proposal as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Also spill every proposed itinerary to this directory
    #[arg(long)]
    spill_dir: Option<PathBuf>,

    /// Itineraries per bulk when restreaming the spill
    #[arg(long, default_value_t = 1024)]
    spill_bulk: usize,

    /// Worker threads
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Entries kept in the search memo
    #[arg(long, default_value_t = 32)]
    memo_capacity: usize,

    /// Itineraries merged per pass
    #[arg(long, default_value_t = 128 * 1024)]
    merge_chunk: usize,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn create(path: &Path) -> Result<BufWriter<File>, Box<dyn Error>> {
    let file = File::create(path).map_err(|e| format!("cannot create {}: {e}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = SearchConfig::new(
        args.threads,
        args.memo_capacity,
        args.merge_chunk,
        args.max_layover,
    )
    .sanitized();

    let mut names = Interner::new();
    let request = TripRequest::new(
        names.intern(&args.from),
        names.intern(&args.to),
        TimeWindow::new(args.departure_time_min, args.departure_time_max),
        TimeWindow::new(args.arrival_time_min, args.arrival_time_max),
    )
    .with_vacation(
        args.vacation_time_min,
        args.vacation_time_max,
        args.vacation_airports.iter().map(|c| names.intern(c)).collect(),
    );
    request.validate()?;

    let flights = load_flights(&args.flights, &mut names, &request.windows())?;
    let alliances = load_alliances(&args.alliances, &mut names)?;
    info!(
        flights = flights.len(),
        alliances = alliances.len(),
        workers = config.workers,
        "session ready"
    );

    let ctx = SessionContext::new(flights, alliances, config.workers)?;
    let mut planner = Planner::new(&ctx, &config);

    let proposals = planner.vacation_trips(&request)?;
    let round_trip = planner.round_trip(&request)?;
    info!(
        memo_hits = planner.memo().hits(),
        memo_misses = planner.memo().misses(),
        "search finished"
    );

    let report = TextReport::new(ctx.flights(), &names);

    let mut out = create(&args.play_hard_file)?;
    report.write_vacation_trips(&mut out, &proposals)?;
    out.flush()?;

    let mut out = create(&args.work_hard_file)?;
    report.write_round_trip(&mut out, &round_trip)?;
    out.flush()?;

    if let Some(path) = &args.json {
        let plan = PlanResult::new(&round_trip, &proposals, ctx.flights(), &names);
        let mut out = create(path)?;
        serde_json::to_writer_pretty(&mut out, &plan)?;
        out.flush()?;
    }

    if let Some(dir) = &args.spill_dir {
        let mut itineraries = vec![round_trip.itinerary.clone()];
        itineraries.extend(proposals.iter().map(|p| p.trip.itinerary.clone()));
        spill::write_itineraries(dir, &itineraries)?;

        let mut restreamed = 0;
        for bulk in SpillReader::open(dir, args.spill_bulk)? {
            restreamed += bulk?.len();
        }
        info!(dir = %dir.display(), restreamed, "spilled proposals");
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}
