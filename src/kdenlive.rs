//! Kdenlive (MLT XML) project serialization.

use std::io::Write;
use std::path::{Path, PathBuf};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rand::Rng;

use crate::constants::*;
use crate::error::Result;
use crate::layout::{Layout, TRACK_COUNT};
use crate::timecode::format_time_from_frames;

/// Random identifiers Kdenlive stores with every document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionIds {
    pub timeline_uuid: u64,
    pub session_id: u64,
    pub sequence_folder: u32,
}

impl SessionIds {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self {
            timeline_uuid: rng.random_range(1_000_000_000_000..=9_999_999_999_999),
            session_id: rng.random_range(1_000_000_000_000..=9_999_999_999_999),
            sequence_folder: rng.random_range(1..=1000),
        }
    }
}

/// Sequential `kdenlive:id` values, starting at 1.
#[derive(Debug)]
pub struct KdenliveIds {
    next: u32,
}

impl KdenliveIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        id.to_string()
    }
}

impl Default for KdenliveIds {
    fn default() -> Self {
        Self::new()
    }
}

pub struct KdenliveProject<'a> {
    layout: &'a Layout,
    image_folder: &'a Path,
    music_file: Option<PathBuf>,
    session: SessionIds,
}

impl<'a> KdenliveProject<'a> {
    pub fn new(layout: &'a Layout, image_folder: &'a Path, session: SessionIds) -> Self {
        Self { layout, image_folder, music_file: None, session }
    }

    /// Adds a background audio producer. `music_file` must already be resolved.
    pub fn with_music(mut self, music_file: PathBuf) -> Self {
        self.music_file = Some(music_file);
        self
    }

    fn time(&self, frames: u64) -> String {
        format_time_from_frames(frames, self.layout.timing.fps)
    }

    pub fn write_to<W: Write>(&self, out: W) -> Result<()> {
        let mut xml = XmlOut { writer: Writer::new_with_indent(out, b' ', 2) };
        let mut ids = KdenliveIds::new();
        let folder = self.image_folder.display().to_string();
        let total_time = self.time(self.layout.total_frames);

        xml.writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml.open("mlt", &[
            ("LC_NUMERIC", "C"),
            ("producer", "main_bin"),
            ("root", &folder),
            ("version", MLT_VERSION),
        ])?;
        self.write_profile(&mut xml)?;

        // --- Black background ---
        xml.open("producer", &[("id", "producer_black"), ("in", ZERO_TIME), ("out", &total_time)])?;
        xml.property("length", COLOR_LENGTH)?;
        xml.property("eof", "continue")?;
        xml.property("resource", "black")?;
        xml.property("aspect_ratio", "1")?;
        xml.property("mlt_service", "color")?;
        xml.property("kdenlive:playlistid", "black_track")?;
        xml.property("mlt_image_format", "rgba")?;
        xml.property("set.test_audio", "0")?;
        xml.property("kdenlive:id", &ids.next_id())?;
        xml.close("producer")?;

        // --- Image producers ---
        for slide in &self.layout.slides {
            let duration = self.time(slide.length());
            xml.open("producer", &[("id", &slide.producer_id()), ("in", ZERO_TIME), ("out", &duration)])?;
            xml.property("resource", &slide.resource.display().to_string())?;
            xml.property("length", &slide.length().to_string())?;
            xml.property("ttl", &IMAGE_TTL.to_string())?;
            xml.property("aspect_ratio", "1")?;
            xml.property("format", "1")?;
            xml.property("kdenlive:duration", &duration)?;
            xml.property("kdenlive:monitorPosition", "0")?;
            xml.property("kdenlive:id", &ids.next_id())?;
            xml.close("producer")?;
        }

        if let Some(music) = &self.music_file {
            xml.open("producer", &[("id", "music")])?;
            xml.property("resource", &music.display().to_string())?;
            xml.property("kdenlive:id", &ids.next_id())?;
            xml.close("producer")?;
        }

        // --- Alternating video tracks ---
        let duration = self.time(self.layout.display_frames());
        for track in 0..TRACK_COUNT {
            xml.open("playlist", &[("id", &format!("playlist{}", track))])?;
            xml.property("kdenlive:id", &ids.next_id())?;
            for slot in self.layout.track(track) {
                let producer = self.layout.slides[slot.slide_index].producer_id();
                xml.empty("blank", &[("length", &self.time(slot.blank_frames))])?;
                xml.empty("entry", &[("in", ZERO_TIME), ("out", &duration), ("producer", &producer)])?;
            }
            xml.close("playlist")?;
        }

        self.write_main_bin(&mut xml, &folder, &total_time)?;
        self.write_tractor(&mut xml, &total_time, &mut ids)?;

        xml.close("mlt")?;
        xml.writer.into_inner().flush()?;
        Ok(())
    }

    fn write_profile<W: Write>(&self, xml: &mut XmlOut<W>) -> Result<()> {
        let fps = self.layout.timing.fps.to_string();
        let width = RENDER_WIDTH.to_string();
        let height = RENDER_HEIGHT.to_string();
        xml.empty("profile", &[
            ("colorspace", "709"),
            ("description", PROFILE_DESCRIPTION),
            ("display_aspect_den", "9"),
            ("display_aspect_num", "16"),
            ("frame_rate_den", "1"),
            ("frame_rate_num", &fps),
            ("height", &height),
            ("progressive", "1"),
            ("sample_aspect_den", "1"),
            ("sample_aspect_num", "1"),
            ("width", &width),
        ])
    }

    fn write_main_bin<W: Write>(&self, xml: &mut XmlOut<W>, folder: &str, total_time: &str) -> Result<()> {
        let timeline_uuid = self.session.timeline_uuid.to_string();
        let session_id = self.session.session_id.to_string();
        let sequence_folder = self.session.sequence_folder.to_string();

        // Empty values are written as self-closing properties
        let properties: [(&str, &str); 34] = [
            ("kdenlive:folder.-1.2", "Sequences"),
            ("kdenlive:sequenceFolder", &sequence_folder),
            ("kdenlive:docproperties.activetimeline", &timeline_uuid),
            ("kdenlive:docproperties.audioChannels", "2"),
            ("kdenlive:docproperties.binsort", "0"),
            ("kdenlive:docproperties.browserurl", folder),
            ("kdenlive:docproperties.documentid", DOCUMENT_ID),
            ("kdenlive:docproperties.enableTimelineZone", "0"),
            ("kdenlive:docproperties.enableexternalproxy", "0"),
            ("kdenlive:docproperties.enableproxy", "0"),
            ("kdenlive:docproperties.externalproxyparams", "./;;.LRV;./;;.MP4"),
            ("kdenlive:docproperties.generateimageproxy", "0"),
            ("kdenlive:docproperties.generateproxy", "0"),
            ("kdenlive:docproperties.kdenliveversion", KDENLIVE_VERSION),
            ("kdenlive:docproperties.opensequences", &timeline_uuid),
            ("kdenlive:docproperties.previewextension", ""),
            ("kdenlive:docproperties.previewparameters", ""),
            ("kdenlive:docproperties.profile", PROFILE),
            ("kdenlive:docproperties.proxyextension", ""),
            ("kdenlive:docproperties.proxyimageminsize", "2000"),
            ("kdenlive:docproperties.proxyimagesize", "800"),
            ("kdenlive:docproperties.proxyminsize", "1000"),
            ("kdenlive:docproperties.proxyparams", ""),
            ("kdenlive:docproperties.proxyresize", "640"),
            ("kdenlive:docproperties.seekOffset", "15000"),
            ("kdenlive:docproperties.sessionid", &session_id),
            ("kdenlive:docproperties.uuid", &timeline_uuid),
            ("kdenlive:docproperties.version", "1.1"),
            ("kdenlive:expandedFolders", ""),
            ("kdenlive:binZoom", "4"),
            ("kdenlive:extraBins", "project_bin:-1:0"),
            ("kdenlive:documentnotes", ""),
            ("kdenlive:documentnotesversion", "2"),
            ("xml_retain", "1"),
        ];

        xml.open("playlist", &[("id", "main_bin")])?;
        for (name, value) in properties {
            xml.property(name, value)?;
        }
        for slide in &self.layout.slides {
            let duration = self.time(slide.length());
            xml.empty("entry", &[("in", ZERO_TIME), ("out", &duration), ("producer", &slide.producer_id())])?;
        }
        xml.empty("entry", &[("in", ZERO_TIME), ("out", total_time), ("producer", "tractor0")])?;
        xml.close("playlist")
    }

    fn write_tractor<W: Write>(&self, xml: &mut XmlOut<W>, total_time: &str, ids: &mut KdenliveIds) -> Result<()> {
        xml.open("tractor", &[("id", "tractor0"), ("in", ZERO_TIME), ("out", total_time)])?;
        xml.property("kdenlive:audio_track", "1")?;
        xml.property("kdenlive:trackheight", "72")?;
        xml.property("kdenlive:timeline_active", "1")?;
        xml.property("kdenlive:collapsed", "0")?;
        xml.property("kdenlive:thumbs_format", "")?;
        xml.property("kdenlive:audio_rec", "")?;
        for track in 0..TRACK_COUNT {
            xml.empty("track", &[("hide", "audio"), ("producer", &format!("playlist{}", track))])?;
        }

        for transition in &self.layout.transitions {
            xml.open("transition", &[
                ("id", &transition.id()),
                ("in", &self.time(transition.in_frame)),
                ("out", &self.time(transition.out_frame)),
            ])?;
            xml.property("a_track", "0")?;
            xml.property("b_track", "1")?;
            xml.property("compositing", "0")?;
            xml.property("distort", "0")?;
            xml.property("rotate_center", "0")?;
            xml.property("mlt_service", transition.style.mlt_service())?;
            xml.property("kdenlive_id", transition.style.kdenlive_id())?;
            xml.property("internal_added", "237")?;
            xml.property("always_active", "1")?;
            xml.close("transition")?;
        }

        xml.property("kdenlive:id", &ids.next_id())?;
        xml.close("tractor")
    }
}

struct XmlOut<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlOut<W> {
    fn start<'b>(name: &'b str, attributes: &[(&str, &str)]) -> BytesStart<'b> {
        let mut element = BytesStart::new(name);
        for attribute in attributes {
            element.push_attribute(*attribute);
        }
        element
    }

    fn open(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        self.writer.write_event(Event::Start(Self::start(name, attributes)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        self.writer.write_event(Event::Empty(Self::start(name, attributes)))?;
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn property(&mut self, name: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return self.empty("property", &[("name", name)]);
        }
        self.open("property", &[("name", name)])?;
        self.writer.write_event(Event::Text(BytesText::new(value)))?;
        self.close("property")
    }
}
