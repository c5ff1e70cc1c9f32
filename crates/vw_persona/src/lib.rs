//! Persona text rendering. Pure functions, no I/O: a fixed table maps an
//! exact person name to a narrative template; anything else falls back to a
//! generic template. Every template interpolates the title and summary
//! verbatim and closes with a signature line carrying the person's name.

type PersonaTemplate = fn(&str, &str, &str) -> String;

/// Exact-match, case-sensitive table. No fuzzy or partial-name matching.
const PERSONAS: &[(&str, PersonaTemplate)] = &[
    ("Albert Einstein", einstein),
    ("William Shakespeare", shakespeare),
    ("Winston Churchill", churchill),
    ("Oprah Winfrey", oprah),
    ("David Attenborough", attenborough),
];

/// Render the long-form perspective text for one article. Deterministic;
/// the title and summary appear verbatim in the output.
pub fn render(person_name: &str, title: &str, summary: &str) -> String {
    let template = PERSONAS
        .iter()
        .find(|(name, _)| *name == person_name)
        .map(|(_, template)| *template)
        .unwrap_or(generic);
    template(person_name, title, summary)
}

/// Names with a dedicated voice, in table order.
pub fn persona_names() -> impl Iterator<Item = &'static str> {
    PERSONAS.iter().map(|(name, _)| *name)
}

fn einstein(name: &str, title: &str, summary: &str) -> String {
    format!(
        "When I first read of \"{title}\", I was reminded that the universe is not only \
stranger than we suppose, but stranger than we can suppose.\n\n\
{summary}\n\n\
One must not pretend the matter is simple. Nature hides her secrets through the loftiness \
of her character, never through cunning, and the same is true of human affairs: what looks \
like chaos from the newspaper stand is usually a set of forces we have not yet taken the \
trouble to understand. I would urge the reader to do what I have always tried to do, which \
is to hold curiosity above certainty, and never stop questioning.\n\n\
With warm regards and a measure of wonder,\n— {name}"
    )
}

fn shakespeare(name: &str, title: &str, summary: &str) -> String {
    format!(
        "Hark, gentle reader, and attend this tale the criers call \"{title}\".\n\n\
{summary}\n\n\
What stage is this, whereon such players strut? All the world supplies the theatre, and \
these our newsmakers, poor walking shadows, do fret their hour most loudly. Yet mark me \
well: there is a tide in the affairs of men which, taken at the flood, leads on to \
fortune, and he that reads wisely may yet choose his current. Think on it, and be not \
idle in the thinking.\n\n\
Thine in ink and earnest,\n— {name}"
    )
}

fn churchill(name: &str, title: &str, summary: &str) -> String {
    format!(
        "I have studied the dispatch titled \"{title}\", and I shall give you my view of it \
plainly, for this is no hour for mumbling.\n\n\
{summary}\n\n\
Let us not be deceived by the comfortable or alarmed by the clamorous. Difficulties \
mastered are opportunities won, and the nation that faces its news squarely, neither \
flinching nor gloating, is the nation that endures. We shall study the facts, we shall \
argue them in the open, and we shall never surrender our judgment to the loudest voice \
in the room.\n\n\
Yours in resolve,\n— {name}"
    )
}

fn oprah(name: &str, title: &str, summary: &str) -> String {
    format!(
        "Friends, when I saw the story \"{title}\", I had to stop and sit with it for a \
moment, because stories like this are really about all of us.\n\n\
{summary}\n\n\
Here is what I know for sure: behind every headline there are real people making hard \
choices, and every one of those choices is a chance to grow. So do not just scroll past \
this one. Ask yourself what it means for your own life, your own community, your own \
intention for this moment. That is where news stops being noise and starts being \
wisdom.\n\n\
With love and intention,\n— {name}"
    )
}

fn attenborough(name: &str, title: &str, summary: &str) -> String {
    format!(
        "Here, in the restless habitat of human affairs, we observe a remarkable event the \
wires have labelled \"{title}\".\n\n\
{summary}\n\n\
Watch closely. The behaviour on display, the manoeuvring, the signalling, the careful \
competition for resources and attention, has been refined over countless generations. It \
is easy to dismiss it as mere spectacle, yet nothing in this landscape happens without \
reason. If we are patient, and if we observe without judgement, the pattern reveals \
itself, and with it a truth about the creatures involved: they are, all of them, us.\n\n\
Quietly observed,\n— {name}"
    )
}

/// Default voice for names without a dedicated template. Still interpolates
/// title and summary; carries no persona-specific framing.
fn generic(name: &str, title: &str, summary: &str) -> String {
    format!(
        "Reflecting on \"{title}\" from the perspective of {name}:\n\n\
{summary}\n\n\
Every story looks different depending on who is telling it. Seen through this lens, the \
events above are less about the headline itself and more about what it asks of the \
people living through it.\n\n\
— {name}"
    )
}
